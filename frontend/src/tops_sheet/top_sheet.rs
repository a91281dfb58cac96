//! Sliding top-sheet container used by every dialog in the app. The sheet
//! is always mounted; visibility is toggled through the `show` class so
//! the CSS transition can run.

use uuid::Uuid;
use yew::{html, Component, Context, Html, NodeRef, Properties};

pub struct TopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

// The class flips after a short delay so a sheet opened in the same tick
// it was mounted still animates.
fn toggle_show(top_sheet_ref: NodeRef, show: bool) {
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(50).await;
        if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
            let class_list = top_sheet.class_list();
            let result = if show {
                class_list.add_1("show")
            } else {
                class_list.remove_1("show")
            };
            result.ok();
        }
    });
}

pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show(top_sheet_ref, true);
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    toggle_show(top_sheet_ref, false);
}
