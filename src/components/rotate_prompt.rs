use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RotatePromptProps {
    pub visible: bool,
}

/// Full-screen blocker shown while a phone is held upright.
#[function_component]
pub fn RotatePrompt(props: &RotatePromptProps) -> Html {
    if !props.visible {
        return html! {};
    }
    html! {
        <div class="rotate-prompt">
            <div class="rotate-icon">{"⟳"}</div>
            <p>{"Rotate your device to landscape to play."}</p>
        </div>
    }
}
