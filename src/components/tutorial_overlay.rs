use yew::prelude::*;

use super::overlay_host::{OverlayFrame, OverlayHandle};
use crate::state::VisibilityState;
use crate::util::log_err;

#[derive(Properties, PartialEq, Clone)]
pub struct TutorialOverlayProps {
    pub handle: OverlayHandle,
    /// Touch devices get the on-screen control instructions.
    pub mobile: bool,
}

#[function_component(TutorialOverlay)]
pub fn tutorial_overlay(props: &TutorialOverlayProps) -> Html {
    let start_btn = {
        let handle = props.handle.clone();
        Callback::from(move |_| {
            if let Err(e) = handle.hide() {
                log_err("tutorial", &e);
            }
        })
    };
    let ready = props.handle.state() == VisibilityState::Visible;
    let steps: &[&str] = if props.mobile {
        &[
            "Use the arrow pad on the left to run and switch lanes.",
            "Tap the round button on the right to use your skill when it glows.",
            "Collect mora along the way; crashing into debris ends the run.",
        ]
    } else {
        &[
            "Use W A S D to run and switch lanes.",
            "Press Space to use your skill once it has recharged.",
            "Collect mora along the way; crashing into debris ends the run.",
        ]
    };
    html! {
        <OverlayFrame handle={props.handle.clone()} backdrop=true>
            <h2 class="overlay-title">{"How to Play"}</h2>
            <ul class="tutorial-steps">
                { for steps.iter().map(|s| html! { <li>{ *s }</li> }) }
            </ul>
            <p class="tutorial-tip">{"Pick a character below, then press Confirm to start the story."}</p>
            <div class="overlay-actions">
                <button onclick={start_btn} disabled={!ready}>{"Got it"}</button>
            </div>
        </OverlayFrame>
    }
}
