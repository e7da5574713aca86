//! Host menu collaborator
//!
//! The game is one selectable entry in an external game-selection shell. The
//! shell only needs a directory of launchable entries - id, title, and how to
//! launch - which this module owns and exports as JSON. Routing itself is the
//! shell's business.
//!
//! Also home to the fire-and-forget "back to menu" overlay button that gets
//! injected on top of whatever game is running.

use serde::Serialize;

/// How the shell launches an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LaunchTarget {
    /// Mounted in-process inside the shell
    Component,
    /// Standalone page reached by navigation
    Page { path: &'static str },
}

/// One launchable entry in the shell's game grid
#[derive(Debug, Clone, Serialize)]
pub struct GameEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    #[serde(flatten)]
    pub target: LaunchTarget,
}

/// The full game directory, in menu order. This crate implements the first
/// entry; the rest are the shell's other games.
pub fn directory() -> Vec<GameEntry> {
    vec![
        GameEntry {
            id: "gato-luz",
            title: "Gato Travieso",
            description: "Rasguña el sofá sin que la luz te atrape",
            emoji: "🐱",
            target: LaunchTarget::Component,
        },
        GameEntry {
            id: "perrito-react",
            title: "La Cena del Perrito",
            description: "Alimenta al perrito encontrando la comida correcta",
            emoji: "🐶",
            target: LaunchTarget::Component,
        },
        GameEntry {
            id: "robo",
            title: "Robo Perfecto",
            description: "Memoriza y roba el botín sin ser atrapado",
            emoji: "💎",
            target: LaunchTarget::Component,
        },
        GameEntry {
            id: "abuela",
            title: "Propulsor de la Abuela",
            description: "¡Ayuda a la abuela a despegar con su cohete navideño!",
            emoji: "🚀",
            target: LaunchTarget::Page {
                path: "/abuela.html",
            },
        },
        GameEntry {
            id: "cohete",
            title: "Cohete a Gas",
            description: "Controla el cohete evitando los peligrosos farts",
            emoji: "🚀",
            target: LaunchTarget::Page {
                path: "/cohete.html",
            },
        },
        GameEntry {
            id: "galletas",
            title: "Galletas Explosivas",
            description: "La niña debe atrapar galletas antes de que exploten",
            emoji: "🍪",
            target: LaunchTarget::Page {
                path: "/galletas.html",
            },
        },
        GameEntry {
            id: "saltar",
            title: "Santa Claus Saltarín",
            description: "Santa salta entre edificios navideños",
            emoji: "🎅",
            target: LaunchTarget::Page {
                path: "/saltar.html",
            },
        },
    ]
}

/// Directory as JSON for the shell page
pub fn directory_json() -> String {
    serde_json::to_string(&directory()).unwrap_or_else(|_| "[]".to_string())
}

/// Inject the floating "back to menu" button over the current page.
///
/// Clicking it navigates to the shell root. The caller may attach its own
/// click listener to the returned element first (e.g. to cancel a pending
/// animation frame before the page unloads).
#[cfg(target_arch = "wasm32")]
pub fn inject_back_button(document: &web_sys::Document) -> Result<web_sys::Element, wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let button = document.create_element("button")?;
    button.set_text_content(Some("← Volver al Menú"));
    button.set_attribute(
        "style",
        "position: fixed; top: 16px; left: 16px; z-index: 9999; \
         background-color: rgba(31, 41, 55, 0.95); color: white; \
         padding: 12px 20px; border-radius: 8px; border: none; \
         font-weight: 600; cursor: pointer; \
         box-shadow: 0 4px 6px rgba(0, 0, 0, 0.3); \
         font-family: system-ui, -apple-system, sans-serif;",
    )?;

    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    });
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();

    if let Some(body) = document.body() {
        body.append_child(&button)?;
    }
    Ok(button)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_ids_are_unique() {
        let entries = directory();
        let mut ids: Vec<_> = entries.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn this_game_is_an_in_process_entry() {
        let entries = directory();
        let me = entries.iter().find(|e| e.id == "gato-luz").unwrap();
        assert_eq!(me.target, LaunchTarget::Component);
    }

    #[test]
    fn json_export_has_launch_fields() {
        let json = directory_json();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), directory().len());

        let first = &entries[0];
        assert_eq!(first["id"], "gato-luz");
        assert_eq!(first["type"], "component");

        let page = entries
            .iter()
            .find(|e| e["type"] == "page")
            .expect("at least one page entry");
        assert!(page["path"].as_str().unwrap().ends_with(".html"));
    }
}
