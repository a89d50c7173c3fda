use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::error::UiError;
use crate::platform;
use crate::state::overlay::{
    OverlayKind, OverlaySequencer, Placement, PrimaryAction, Rect, ShowRequest, SlideCursor,
    Ticket, VisibilityState,
};
use crate::util::log_err;

/// Shared handle to one overlay instance. Clones point at the same sequencer;
/// the embedded revision makes props compare unequal after every transition.
#[derive(Clone)]
pub struct OverlayHandle {
    seq: Rc<RefCell<OverlaySequencer>>,
    // Holds the one armed transition; replacing or clearing it cancels the timer.
    timer: Rc<RefCell<Option<Timeout>>>,
    on_hidden: Rc<RefCell<Callback<()>>>,
    redraw: UseForceUpdateHandle,
    revision: u64,
}

impl PartialEq for OverlayHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.seq, &other.seq) && self.revision == other.revision
    }
}

impl OverlayHandle {
    pub fn kind(&self) -> OverlayKind {
        self.seq.borrow().kind()
    }

    pub fn state(&self) -> VisibilityState {
        self.seq.borrow().state()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.seq.borrow().placement()
    }

    pub fn cursor(&self) -> Option<SlideCursor> {
        self.seq.borrow().cursor()
    }

    pub fn primary_action(&self) -> Option<PrimaryAction> {
        self.seq.borrow().primary_action()
    }

    pub fn is_sliding(&self) -> bool {
        self.seq.borrow().is_sliding()
    }

    pub fn dismisses_on_outside_click(&self) -> bool {
        self.seq.borrow().dismisses_on_outside_click()
    }

    /// Attaches the overlay, anchored to `anchor` or centred.
    pub fn show(&self, anchor: Option<Rect>) -> Result<(), UiError> {
        let request = ShowRequest {
            host: platform::host_info(),
            anchor,
        };
        let ticket = self.seq.borrow_mut().show(request)?;
        self.arm(ticket);
        self.redraw.force_update();
        Ok(())
    }

    pub fn hide(&self) -> Result<(), UiError> {
        let next = self.seq.borrow_mut().hide()?;
        if let Some(ticket) = next {
            self.arm(ticket);
        }
        self.redraw.force_update();
        Ok(())
    }

    pub fn advance(&self) -> Result<(), UiError> {
        let ticket = self.seq.borrow_mut().advance()?;
        self.arm(ticket);
        self.redraw.force_update();
        Ok(())
    }

    /// Removes the overlay at once and cancels whatever was scheduled.
    pub fn teardown(&self) {
        self.timer.borrow_mut().take();
        self.seq.borrow_mut().teardown();
        self.redraw.force_update();
    }

    fn arm(&self, ticket: Ticket) {
        let handle = self.clone();
        let timeout = Timeout::new(ticket.delay_ms, move || handle.fire(ticket));
        *self.timer.borrow_mut() = Some(timeout);
    }

    fn fire(&self, ticket: Ticket) {
        let _fired = self.timer.borrow_mut().take();
        let result = self.seq.borrow_mut().complete(ticket);
        match result {
            Ok(Some(next)) => self.arm(next),
            Ok(None) => {
                if self.state() == VisibilityState::Hidden {
                    let cb = self.on_hidden.borrow().clone();
                    cb.emit(());
                }
            }
            Err(e) => log_err("overlay timer", &e),
        }
        self.redraw.force_update();
    }
}

/// Owns one overlay sequencer for the lifetime of the calling component.
/// `on_hidden` runs each time an exit animation finishes.
#[hook]
pub fn use_overlay(kind: OverlayKind, slide_count: usize, on_hidden: Callback<()>) -> OverlayHandle {
    let seq = use_mut_ref(|| OverlaySequencer::with_slides(kind, slide_count));
    let timer = use_mut_ref(|| None::<Timeout>);
    let on_hidden_ref = use_mut_ref(|| on_hidden.clone());
    *on_hidden_ref.borrow_mut() = on_hidden;
    let redraw = use_force_update();
    {
        let seq = seq.clone();
        let timer = timer.clone();
        use_effect_with((), move |_| {
            move || {
                timer.borrow_mut().take();
                seq.borrow_mut().teardown();
            }
        });
    }
    let revision = seq.borrow().revision();
    OverlayHandle {
        seq,
        timer,
        on_hidden: on_hidden_ref,
        redraw,
        revision,
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct OverlayFrameProps {
    pub handle: OverlayHandle,
    /// Dim the page behind the panel and swallow clicks.
    #[prop_or_default]
    pub backdrop: bool,
    #[prop_or_default]
    pub node_ref: NodeRef,
    #[prop_or_default]
    pub children: Html,
}

/// Portals the panel into the overlay host with the placement and animation
/// class for the current state. Renders nothing while hidden.
#[function_component]
pub fn OverlayFrame(props: &OverlayFrameProps) -> Html {
    let handle = &props.handle;
    let state = handle.state();
    if state == VisibilityState::Hidden {
        return html! {};
    }
    let host = match platform::overlay_host() {
        Ok(h) => h,
        Err(e) => {
            log_err("overlay render", &e);
            return html! {};
        }
    };
    let kind = handle.kind();
    let timing = kind.timing();
    let duration = match state {
        VisibilityState::Entering => timing.enter_ms,
        VisibilityState::Exiting => timing.exit_ms,
        _ => 0,
    };
    let placement = handle.placement().unwrap_or(Placement::Centered);
    let style = format!("{} animation-duration:{}ms;", placement.style(), duration);
    let panel = html! {
        <div
            ref={props.node_ref.clone()}
            class={classes!("overlay", format!("overlay-{}", kind.css_name()), state.css_class())}
            {style}
        >
            { props.children.clone() }
        </div>
    };
    let content = if props.backdrop {
        html! {
            <div
                class={classes!("overlay-backdrop", state.css_class())}
                style={format!("animation-duration:{}ms;", duration)}
            >
                { panel }
            </div>
        }
    } else {
        panel
    };
    yew::create_portal(content, host)
}
