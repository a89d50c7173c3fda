use chara_select::components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
