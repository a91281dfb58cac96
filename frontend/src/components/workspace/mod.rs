//! Write-up workspace: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic, view rendering
//! and helpers. On first render the saved draft (if any) is restored from
//! localStorage.

use yew::prelude::*;

use common::store::Action;

mod dialogs;
mod helpers;
mod messages;
mod state;
mod update;
mod view;

use helpers::{show_toast, today_string};
pub use messages::Msg;
pub use state::WorkspaceComponent;

impl Component for WorkspaceComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        WorkspaceComponent::new(&today_string())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            if let Some(draft) = crate::storage::load_draft(&today_string()) {
                ctx.link().send_message(Msg::Apply(Action::LoadWriteUp(draft)));
                show_toast("Restored your saved draft.");
            }
        }
    }
}
