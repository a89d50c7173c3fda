use yew::prelude::*;

use super::overlay_host::{OverlayFrame, OverlayHandle};
use crate::model::StorySlide;
use crate::state::{OverlayKind, PrimaryAction, VisibilityState};
use crate::util::log_err;

#[derive(Properties, PartialEq, Clone)]
pub struct StoryOverlayProps {
    pub handle: OverlayHandle,
    pub slides: Vec<StorySlide>,
    pub character: AttrValue,
    /// Fired from the last slide; the app persists the choice and leaves.
    pub on_ready: Callback<()>,
}

#[function_component]
pub fn StoryOverlay(props: &StoryOverlayProps) -> Html {
    let handle = &props.handle;
    let index = handle.cursor().map(|c| c.index()).unwrap_or(0);
    let settled = handle.state() == VisibilityState::Visible && !handle.is_sliding();

    let next_cb = {
        let handle = handle.clone();
        Callback::from(move |_| {
            if let Err(e) = handle.advance() {
                log_err("story", &e);
            }
        })
    };
    let ready_cb = {
        let cb = props.on_ready.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let slide = match props.slides.get(index) {
        Some(s) => {
            let class = classes!("story-slide", handle.is_sliding().then_some("sliding"));
            let style = format!(
                "animation-duration:{}ms;",
                OverlayKind::Story.timing().slide_ms
            );
            html! {
                <div key={index.to_string()} {class} {style}>
                    { for s.image.iter().map(|src| html! { <img class="story-art" src={src.clone()} alt="" /> }) }
                    <h2 class="overlay-title">{ s.title.clone() }</h2>
                    <p class="story-body">{ s.body.clone() }</p>
                </div>
            }
        }
        None => html! {},
    };
    let dots = html! {
        <div class="story-dots">
            { for (0..props.slides.len()).map(|i| html! {
                <span class={classes!("dot", (i == index).then_some("active"))}></span>
            }) }
        </div>
    };
    let (show_next, show_ready) = match handle.primary_action() {
        Some(PrimaryAction::Next) => (true, false),
        Some(PrimaryAction::Ready) => (false, true),
        None => (false, false),
    };

    html! {
        <OverlayFrame handle={handle.clone()} backdrop=true>
            <div class="story-character">{ format!("Playing as {}", props.character) }</div>
            { slide }
            { dots }
            <div class="overlay-actions">
                if show_next {
                    <button class="story-next" onclick={next_cb} disabled={!settled}>{"Next"}</button>
                }
                if show_ready {
                    <button class="story-ready" onclick={ready_cb} disabled={!settled}>{"Ready"}</button>
                }
            </div>
        </OverlayFrame>
    }
}
