use crate::app::App;

mod ai;
mod app;
mod components;
mod storage;
mod tops_sheet;

fn main() {
    yew::Renderer::<App>::new().render();
}
