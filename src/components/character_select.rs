use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use crate::model::{CharacterCatalog, CharacterRecord, GameMode};

#[derive(Properties, PartialEq, Clone)]
pub struct CharacterSelectProps {
    pub catalog: Rc<CharacterCatalog>,
    pub selected: AttrValue,
    pub mode: GameMode,
    pub on_select: Callback<String>,
    /// Locked card tapped; carries the card element so the bubble can anchor to it.
    pub on_locked: Callback<(String, Element)>,
    pub on_confirm: Callback<()>,
}

#[function_component]
pub fn CharacterSelect(props: &CharacterSelectProps) -> Html {
    let cards = props.catalog.iter().map(|c| {
        let id = c.id.clone();
        let locked = c.locked;
        let on_select = props.on_select.clone();
        let on_locked = props.on_locked.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            if locked {
                if let Some(el) = e.current_target().and_then(|t| t.dyn_into::<Element>().ok()) {
                    on_locked.emit((id.clone(), el));
                }
            } else {
                on_select.emit(id.clone());
            }
        });
        let selected = props.selected.as_str() == c.id;
        html! {
            <button
                key={c.id.clone()}
                class={classes!("character-card", selected.then_some("selected"), locked.then_some("locked"))}
                {onclick}
            >
                { for c.portrait().map(|src| html! { <img src={src.to_string()} alt={c.name.clone()} /> }) }
                <span class="card-name">{ c.name.clone() }</span>
                if locked { <span class="card-lock">{"🔒"}</span> }
            </button>
        }
    });

    let confirm_cb = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let detail = props
        .catalog
        .get(props.selected.as_str())
        .ok()
        .map(character_detail)
        .unwrap_or_default();

    html! {
        <div class="character-select">
            <h1 class="select-title">{"Choose Your Runner"}</h1>
            <div class="character-grid">{ for cards }</div>
            { detail }
            <div class="select-footer">
                <span class="mode-badge">{ props.mode.label() }</span>
                <button class="confirm-btn" onclick={confirm_cb}>{"Confirm"}</button>
            </div>
        </div>
    }
}

fn character_detail(c: &CharacterRecord) -> Html {
    html! {
        <div class="character-detail">
            <div class="detail-gallery">
                { for c.images.iter().map(|src| html! { <img src={src.clone()} alt={c.name.clone()} /> }) }
            </div>
            <div class="detail-text">
                <h2>{ c.name.clone() }</h2>
                <p class="detail-description">{ c.description.clone() }</p>
                <p class="detail-skill"><strong>{"Skill: "}</strong>{ c.skill.clone() }</p>
            </div>
        </div>
    }
}
