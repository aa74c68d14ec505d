use dioxus::prelude::*;

use crate::components::styles::CONSOLE_STYLES;
use crate::components::Header;
use crate::pages::{ConfigureTask, FetchDetail, SetupConnection, TaskList, VerifyDetail};
use molt_types::{FetchAttemptId, VerifyAttemptId};

#[derive(Debug, Clone, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        TaskList {},
        #[route("/fetch/:id")]
        FetchDetail { id: FetchAttemptId },
        #[route("/verify/:id")]
        VerifyDetail { id: VerifyAttemptId },
        #[route("/configure-task")]
        ConfigureTask {},
        #[route("/setup-connection")]
        SetupConnection {},
}

#[component]
fn Shell() -> Element {
    rsx! {
        style { {CONSOLE_STYLES} }
        div { class: "console-shell",
            Header {}
            main { class: "console-main", Outlet::<Route> {} }
        }
    }
}
