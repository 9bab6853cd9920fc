//! Resolves every page element the widgets need, once, at startup.

use shared::SetupError;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

pub const OPEN_BUTTON_ID: &str = "floatchat-btn";
pub const GLASS_CONTAINER_ID: &str = "glass-surface-container";
pub const CLOSE_BUTTON_ID: &str = "close-chat";
pub const SEND_BUTTON_ID: &str = "send-btn";
pub const CHAT_INPUT_ID: &str = "chat-input";
pub const MESSAGES_ID: &str = "chatbox-messages";
pub const MAP_ID: &str = "mapid";
pub const SEARCH_INPUT_ID: &str = "location-search";
pub const SUGGESTIONS_ID: &str = "suggestions";

pub const FE_IMAGE_ID: &str = "feImage";
pub const RED_CHANNEL_ID: &str = "redChannel";
pub const GREEN_CHANNEL_ID: &str = "greenChannel";
pub const BLUE_CHANNEL_ID: &str = "blueChannel";
pub const GAUSSIAN_BLUR_ID: &str = "gaussianBlur";

pub struct ChatHandles {
    pub open_button: HtmlElement,
    pub close_button: HtmlElement,
    pub send_button: HtmlElement,
    pub input: HtmlInputElement,
    pub messages: HtmlElement,
}

pub struct SearchHandles {
    pub input: HtmlInputElement,
    pub suggestions: HtmlElement,
}

/// Nodes of the SVG filter graph. All optional: a page without the filter
/// markup still gets the chat, just without the distortion.
pub struct FilterHandles {
    pub image: Option<Element>,
    pub red: Option<Element>,
    pub green: Option<Element>,
    pub blue: Option<Element>,
    pub blur: Option<Element>,
}

pub struct PageHandles {
    pub window: Window,
    pub document: Document,
    pub glass_container: HtmlElement,
    pub map_container: HtmlElement,
    pub chat: ChatHandles,
    pub search: SearchHandles,
    pub filter: FilterHandles,
}

impl PageHandles {
    pub fn resolve() -> Result<Self, SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoGlobal("window"))?;
        let document = window.document().ok_or(SetupError::NoGlobal("document"))?;

        let chat = ChatHandles {
            open_button: require(&document, OPEN_BUTTON_ID, "HTMLElement")?,
            close_button: require(&document, CLOSE_BUTTON_ID, "HTMLElement")?,
            send_button: require(&document, SEND_BUTTON_ID, "HTMLElement")?,
            input: require(&document, CHAT_INPUT_ID, "HTMLInputElement")?,
            messages: require(&document, MESSAGES_ID, "HTMLElement")?,
        };
        let search = SearchHandles {
            input: require(&document, SEARCH_INPUT_ID, "HTMLInputElement")?,
            suggestions: require(&document, SUGGESTIONS_ID, "HTMLElement")?,
        };
        let filter = FilterHandles {
            image: document.get_element_by_id(FE_IMAGE_ID),
            red: document.get_element_by_id(RED_CHANNEL_ID),
            green: document.get_element_by_id(GREEN_CHANNEL_ID),
            blue: document.get_element_by_id(BLUE_CHANNEL_ID),
            blur: document.get_element_by_id(GAUSSIAN_BLUR_ID),
        };

        Ok(Self {
            glass_container: require(&document, GLASS_CONTAINER_ID, "HTMLElement")?,
            map_container: require(&document, MAP_ID, "HTMLElement")?,
            window,
            document,
            chat,
            search,
            filter,
        })
    }
}

fn require<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T, SetupError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SetupError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| SetupError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}
