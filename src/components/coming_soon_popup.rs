use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};
use yew::prelude::*;

use super::overlay_host::{OverlayFrame, OverlayHandle};
use crate::util::log_err;

#[derive(Properties, PartialEq, Clone)]
pub struct ComingSoonPopupProps {
    pub handle: OverlayHandle,
    /// Display name of the locked character that was tapped.
    #[prop_or_default]
    pub character: Option<AttrValue>,
    /// Control that opened the bubble; clicks on it don't count as outside.
    #[prop_or_default]
    pub trigger: Option<Element>,
}

#[function_component]
pub fn ComingSoonPopup(props: &ComingSoonPopupProps) -> Html {
    let panel_ref = use_node_ref();
    // Latest handle/trigger for the document listener, which is installed once.
    let live = use_mut_ref(|| (props.handle.clone(), props.trigger.clone()));
    *live.borrow_mut() = (props.handle.clone(), props.trigger.clone());

    {
        let live = live.clone();
        let panel_ref = panel_ref.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window()
                .and_then(|w| w.document())
                .map(|doc| {
                    EventListener::new(&doc, "click", move |ev| {
                        let (handle, trigger) = live.borrow().clone();
                        if !handle.dismisses_on_outside_click() {
                            return;
                        }
                        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Node>().ok())
                        else {
                            return;
                        };
                        let inside = panel_ref
                            .cast::<Node>()
                            .is_some_and(|p| p.contains(Some(&target)));
                        let on_trigger = trigger.is_some_and(|t| t.contains(Some(&target)));
                        if inside || on_trigger {
                            return;
                        }
                        if let Err(e) = handle.hide() {
                            log_err("coming soon", &e);
                        }
                    })
                });
            move || drop(listener)
        });
    }

    let close_btn = {
        let handle = props.handle.clone();
        Callback::from(move |_| {
            if let Err(e) = handle.hide() {
                log_err("coming soon", &e);
            }
        })
    };
    let name = props
        .character
        .clone()
        .unwrap_or_else(|| AttrValue::from("This character"));
    html! {
        <OverlayFrame handle={props.handle.clone()} node_ref={panel_ref}>
            <div class="bubble-arrow"></div>
            <h3 class="bubble-title">{"Coming soon!"}</h3>
            <p class="bubble-body">{ format!("{name} is still training. Check back after the next update.") }</p>
            <button class="bubble-close" onclick={close_btn}>{"OK"}</button>
        </OverlayFrame>
    }
}
