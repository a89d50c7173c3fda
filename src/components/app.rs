use std::rc::Rc;

use gloo_events::EventListener;
use web_sys::Element;
use yew::prelude::*;

use super::{
    character_select::CharacterSelect, coming_soon_popup::ComingSoonPopup,
    overlay_host::use_overlay, rotate_prompt::RotatePrompt, story_overlay::StoryOverlay,
    touch_controls::TouchControls, tutorial_overlay::TutorialOverlay,
};
use crate::model::{CharacterCatalog, GameMode};
use crate::platform;
use crate::state::{OverlayKind, ViewportAdapter};
use crate::storage::{AnyStore, SelectionStore};
use crate::util::{clog, log_err};

#[function_component(App)]
pub fn app() -> Html {
    let catalog = use_memo((), |_| CharacterCatalog::embedded().map(Rc::new));
    match &*catalog {
        Ok(catalog) => html! { <SelectScreen catalog={catalog.clone()} /> },
        Err(e) => {
            log_err("catalog", e);
            html! { <div class="fatal">{"Character data failed to load."}</div> }
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct SelectScreenProps {
    pub catalog: Rc<CharacterCatalog>,
}

#[function_component(SelectScreen)]
pub fn select_screen(props: &SelectScreenProps) -> Html {
    let catalog = props.catalog.clone();
    let store = use_mut_ref(|| SelectionStore::new(AnyStore::detect()));
    // Load persisted choice, falling back to the default character
    let selected = {
        let catalog = catalog.clone();
        let store = store.clone();
        use_state(move || catalog.load_selection(&*store.borrow()).id.clone())
    };
    let mode = GameMode::default();
    let viewport = use_mut_ref(|| ViewportAdapter::new(&platform::device_profile()));
    let redraw = use_force_update();
    let locked_pick = use_state(|| None::<(AttrValue, Option<Element>)>);

    // Tutorial dismissal reveals the touch pad and lets the game loop start
    let on_tutorial_hidden = {
        let viewport = viewport.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            let first = viewport.borrow_mut().on_tutorial_closed();
            if !first {
                return;
            }
            platform::broadcast_tutorial_closed();
            if viewport.borrow().wants_fullscreen() {
                platform::enter_immersive();
            }
            redraw.force_update();
        })
    };
    let tutorial = use_overlay(OverlayKind::Tutorial, 0, on_tutorial_hidden.clone());
    let coming_soon = use_overlay(OverlayKind::ComingSoon, 0, Callback::noop());
    let story = use_overlay(OverlayKind::Story, catalog.story().len(), Callback::noop());

    // Mount: tutorial, immersive mode, viewport listeners
    {
        let tutorial = tutorial.clone();
        let viewport = viewport.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            if let Err(e) = tutorial.show(None) {
                log_err("tutorial", &e);
                on_tutorial_hidden.emit(());
            }
            if viewport.borrow().wants_fullscreen() {
                platform::enter_immersive();
            }
            let on_resize = {
                let viewport = viewport.clone();
                let redraw = redraw.clone();
                move |_: &web_sys::Event| {
                    let vp = platform::viewport();
                    let flipped = viewport.borrow_mut().on_resize(vp.width, vp.height);
                    if viewport.borrow().wants_landscape_lock() {
                        platform::enter_immersive();
                    }
                    if flipped {
                        redraw.force_update();
                    }
                }
            };
            let window = web_sys::window();
            let resize = window
                .as_ref()
                .map(|w| EventListener::new(w, "resize", on_resize.clone()));
            let orientation = window
                .as_ref()
                .map(|w| EventListener::new(w, "orientationchange", on_resize));
            // Fullscreen needs a user gesture on most browsers
            let first_touch = window.as_ref().and_then(|w| w.document()).map(|doc| {
                let viewport = viewport.clone();
                EventListener::once(&doc, "pointerdown", move |_| {
                    if viewport.borrow().wants_fullscreen() {
                        platform::enter_immersive();
                    }
                })
            });
            move || {
                drop(resize);
                drop(orientation);
                drop(first_touch);
            }
        });
    }

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |id: String| selected.set(id))
    };
    let on_locked = {
        let catalog = catalog.clone();
        let coming_soon = coming_soon.clone();
        let locked_pick = locked_pick.clone();
        Callback::from(move |(id, el): (String, Element)| {
            let name = catalog
                .get(&id)
                .map(|c| AttrValue::from(c.name.clone()))
                .unwrap_or_else(|_| AttrValue::from(id));
            let rect = platform::element_rect(&el);
            locked_pick.set(Some((name, Some(el))));
            if let Err(e) = coming_soon.show(Some(rect)) {
                log_err("coming soon", &e);
            }
        })
    };
    let on_confirm = {
        let catalog = catalog.clone();
        let selected = selected.clone();
        let coming_soon = coming_soon.clone();
        let story = story.clone();
        let locked_pick = locked_pick.clone();
        Callback::from(move |_| {
            match catalog.is_locked(&selected) {
                Ok(false) => {
                    if let Err(e) = story.show(None) {
                        log_err("story", &e);
                    }
                }
                Ok(true) => {
                    let name = catalog
                        .get(&selected)
                        .map(|c| AttrValue::from(c.name.clone()))
                        .ok();
                    locked_pick.set(name.map(|n| (n, None)));
                    if let Err(e) = coming_soon.show(None) {
                        log_err("coming soon", &e);
                    }
                }
                Err(e) => log_err("confirm", &e),
            }
        })
    };
    let on_ready = {
        let catalog = catalog.clone();
        let selected = selected.clone();
        let store = store.clone();
        let story = story.clone();
        Callback::from(move |_| {
            let result = catalog.confirm_selection(&selected, mode, &mut *store.borrow_mut());
            match result {
                Ok(record) => {
                    clog(&format!("selected {} ({})", record.id, mode.as_str()));
                    story.teardown();
                    platform::navigate_to_game();
                }
                Err(e) => log_err("confirm selection", &e),
            }
        })
    };

    let selected_name = catalog
        .get(&selected)
        .map(|c| AttrValue::from(c.name.clone()))
        .unwrap_or_else(|_| AttrValue::from((*selected).clone()));
    let (locked_name, locked_trigger) = match &*locked_pick {
        Some((name, el)) => (Some(name.clone()), el.clone()),
        None => (None, None),
    };
    let vp = viewport.borrow();

    html! {
        <div class="select-screen">
            <CharacterSelect
                catalog={catalog.clone()}
                selected={AttrValue::from((*selected).clone())}
                {mode}
                {on_select}
                {on_locked}
                {on_confirm}
            />
            <TutorialOverlay handle={tutorial} mobile={vp.is_mobile()} />
            <ComingSoonPopup handle={coming_soon} character={locked_name} trigger={locked_trigger} />
            <StoryOverlay
                handle={story}
                slides={catalog.story().to_vec()}
                character={selected_name}
                {on_ready}
            />
            <TouchControls visible={vp.controls_visible()} />
            <RotatePrompt visible={vp.rotate_prompt_visible()} />
        </div>
    }
}
