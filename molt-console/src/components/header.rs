use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn Header() -> Element {
    rsx! {
        header { class: "console-header",
            span { class: "console-title", "MOLT Console" }
            nav { class: "console-nav",
                Link { to: Route::TaskList {}, "Tasks" }
                Link { to: Route::ConfigureTask {}, "Configure task" }
                Link { to: Route::SetupConnection {}, "Connections" }
            }
        }
    }
}
