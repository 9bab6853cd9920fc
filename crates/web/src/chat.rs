//! Chat popup: open/close sequencing and the echo log.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use shared::{ChatLog, ChatMessage, PanelController, PanelEffect};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, KeyboardEvent};

use crate::glass::GlassSurface;
use crate::handles::ChatHandles;

const ACTIVE_CLASS: &str = "active";

pub struct ChatWidget {
    document: Document,
    handles: ChatHandles,
    container: HtmlElement,
    glass: Rc<GlassSurface>,
    log: ChatLog,
    panel: PanelController,
    /// Timer of the transition in progress; dropping it cancels it
    pending: Option<Timeout>,
}

impl ChatWidget {
    pub fn new(
        document: Document,
        handles: ChatHandles,
        container: HtmlElement,
        glass: Rc<GlassSurface>,
    ) -> Self {
        Self {
            document,
            handles,
            container,
            glass,
            log: ChatLog::new(),
            panel: PanelController::default(),
            pending: None,
        }
    }

    /// Wire the buttons and the input. The widget lives as long as the page.
    pub fn install(self) -> Rc<RefCell<Self>> {
        let chat = Rc::new(RefCell::new(self));
        let widget = chat.borrow();

        let weak = Rc::downgrade(&chat);
        EventListener::new(&widget.handles.open_button, "click", move |_| {
            if let Some(chat) = weak.upgrade() {
                let effects = chat.borrow_mut().panel.open();
                Self::apply(&chat, effects);
            }
        })
        .forget();

        let weak = Rc::downgrade(&chat);
        EventListener::new(&widget.handles.close_button, "click", move |_| {
            if let Some(chat) = weak.upgrade() {
                let effects = chat.borrow_mut().panel.close();
                Self::apply(&chat, effects);
            }
        })
        .forget();

        let weak = Rc::downgrade(&chat);
        EventListener::new(&widget.handles.send_button, "click", move |_| {
            if let Some(chat) = weak.upgrade() {
                chat.borrow_mut().send();
            }
        })
        .forget();

        let weak = Rc::downgrade(&chat);
        EventListener::new(&widget.handles.input, "keypress", move |event| {
            let enter = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|key| key.key() == "Enter");
            if !enter {
                return;
            }
            if let Some(chat) = weak.upgrade() {
                chat.borrow_mut().send();
            }
        })
        .forget();

        drop(widget);
        chat
    }

    /// Perform the side effects requested by the panel state machine.
    fn apply(chat: &Rc<RefCell<Self>>, effects: Vec<PanelEffect>) {
        for effect in effects {
            match effect {
                PanelEffect::Show => {
                    let _ = chat.borrow().container.style().set_property("display", "flex");
                }
                PanelEffect::Hide => {
                    let _ = chat.borrow().container.style().set_property("display", "none");
                }
                PanelEffect::Activate => {
                    let _ = chat.borrow().container.class_list().add_1(ACTIVE_CLASS);
                }
                PanelEffect::Deactivate => {
                    let _ = chat.borrow().container.class_list().remove_1(ACTIVE_CLASS);
                }
                PanelEffect::RefreshDisplacement => {
                    let glass = Rc::clone(&chat.borrow().glass);
                    glass.update_displacement_map();
                }
                PanelEffect::StartTimer { token, delay } => {
                    let weak = Rc::downgrade(chat);
                    let timeout = Timeout::new(millis(delay), move || {
                        if let Some(chat) = weak.upgrade() {
                            let effects = chat.borrow_mut().panel.timer_elapsed(token);
                            Self::apply(&chat, effects);
                        }
                    });
                    chat.borrow_mut().pending = Some(timeout);
                }
                PanelEffect::CancelTimer(token) => {
                    tracing::trace!(?token, "cancelling panel timer");
                    chat.borrow_mut().pending = None;
                }
            }
        }
    }

    fn send(&mut self) {
        let Some(appended) = self.log.send(&self.handles.input.value()) else {
            return;
        };
        for message in appended {
            if let Err(err) = render_message(&self.document, &self.handles.messages, message) {
                tracing::warn!(?err, "failed to render chat message");
            }
        }

        self.handles.input.set_value("");
        let messages = &self.handles.messages;
        messages.set_scroll_top(messages.scroll_height());
    }
}

fn render_message(
    document: &Document,
    messages: &HtmlElement,
    message: &ChatMessage,
) -> Result<(), JsValue> {
    let bubble = document.create_element("div")?;
    bubble.class_list().add_1(message.role.css_class())?;
    bubble.set_text_content(Some(&message.text));
    messages.append_child(&bubble)?;
    Ok(())
}

fn millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}
