//! DOM bindings for the upload page.
//!
//! Looks up the page's elements once at start-up and renders [`UiState`] into
//! them. The markup itself belongs to the page; only ids and one class name are
//! assumed.

use leafcheck_core::ui_constants::drop_zone;
use leafcheck_core::{ResultView, UiState};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlImageElement, HtmlInputElement};

/// Element ids the page must provide.
pub mod ids {
    pub const FILE_INPUT: &str = "fileInput";
    pub const PREDICT_BUTTON: &str = "predictBtn";
    pub const PREVIEW: &str = "preview";
    pub const LABEL: &str = "label";
    pub const CONFIDENCE: &str = "confidence";
    pub const REMEDY: &str = "remedy";
    pub const FILE_NAME: &str = "fileNameDisplay";
    pub const DROP_ZONE: &str = "previewArea";
    /// Optional list for ranked alternatives
    pub const TOP_K: &str = "topk";
    /// Placeholder inside the drop zone
    pub const DROP_ZONE_TEXT_SELECTOR: &str = ".drop-zone-text";
}

/// Class of the span holding a result value.
const RESULT_TEXT_CLASS: &str = "result-text";

/// Prefix of the confidence region.
const CONFIDENCE_PREFIX: &str = "Confidence: ";

/// Errors binding to or updating the page.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("No window object available")]
    NoWindow,

    #[error("No document object available")]
    NoDocument,

    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Element {0} has an unexpected type")]
    WrongElementType(String),

    /// A browser API call threw
    #[error("Browser API error: {0}")]
    Js(String),
}

impl DomError {
    pub fn js(value: &JsValue) -> Self {
        Self::Js(describe_js_value(value))
    }
}

/// Best-effort text for a thrown JS value, like `err.toString()`.
pub fn describe_js_value(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.to_string());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// The page elements the controller drives.
pub struct DomElements {
    document: Document,
    pub file_input: HtmlInputElement,
    pub predict_button: HtmlButtonElement,
    preview: HtmlImageElement,
    label: HtmlElement,
    confidence: HtmlElement,
    remedy: HtmlElement,
    file_name: HtmlElement,
    pub drop_zone: HtmlElement,
    drop_zone_text: HtmlElement,
    top_k: Option<HtmlElement>,
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| DomError::WrongElementType(id.to_string()))
}

impl DomElements {
    /// Find every element by id. The top-k list is optional.
    pub fn bind(document: &Document) -> Result<Self, DomError> {
        let drop_zone: HtmlElement = element(document, ids::DROP_ZONE)?;
        let drop_zone_text = drop_zone
            .query_selector(ids::DROP_ZONE_TEXT_SELECTOR)
            .map_err(|e| DomError::js(&e))?
            .ok_or_else(|| DomError::MissingElement(ids::DROP_ZONE_TEXT_SELECTOR.to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::WrongElementType(ids::DROP_ZONE_TEXT_SELECTOR.to_string()))?;

        let top_k = element::<HtmlElement>(document, ids::TOP_K).ok();
        if top_k.is_none() {
            log::debug!("No #{} element, alternatives will not be shown", ids::TOP_K);
        }

        Ok(Self {
            document: document.clone(),
            file_input: element(document, ids::FILE_INPUT)?,
            predict_button: element(document, ids::PREDICT_BUTTON)?,
            preview: element(document, ids::PREVIEW)?,
            label: element(document, ids::LABEL)?,
            confidence: element(document, ids::CONFIDENCE)?,
            remedy: element(document, ids::REMEDY)?,
            file_name: element(document, ids::FILE_NAME)?,
            drop_zone,
            drop_zone_text,
            top_k,
        })
    }

    /// Render the UI state, logging rather than propagating browser errors.
    pub fn render(&self, ui: &UiState) {
        if let Err(e) = self.try_render(ui) {
            log::error!("Failed to render UI state: {}", e);
        }
    }

    fn try_render(&self, ui: &UiState) -> Result<(), DomError> {
        self.predict_button.set_disabled(!ui.submit_enabled);
        self.predict_button.set_text_content(Some(ui.submit_caption));
        self.file_name.set_text_content(Some(&ui.file_name));

        let preview_style = self.preview.style();
        match &ui.preview_src {
            Some(src) => {
                if self.preview.get_attribute("src").as_deref() != Some(src.as_str()) {
                    self.preview.set_src(src);
                }
                preview_style
                    .set_property("display", "block")
                    .map_err(|e| DomError::js(&e))?;
            }
            None => {
                self.preview.set_src("");
                preview_style
                    .set_property("display", "none")
                    .map_err(|e| DomError::js(&e))?;
            }
        }

        self.drop_zone
            .style()
            .set_property("border-style", ui.drop_zone.border.as_css())
            .map_err(|e| DomError::js(&e))?;
        self.drop_zone
            .class_list()
            .toggle_with_force(drop_zone::DRAG_OVER_CLASS, ui.drop_zone.highlighted)
            .map_err(|e| DomError::js(&e))?;
        self.drop_zone_text
            .set_text_content(Some(ui.drop_zone.placeholder));
        self.drop_zone_text
            .style()
            .set_property(
                "display",
                if ui.drop_zone.placeholder_visible { "block" } else { "none" },
            )
            .map_err(|e| DomError::js(&e))?;

        if let Some(results) = &ui.results {
            self.render_results(results)?;
        }
        Ok(())
    }

    fn render_results(&self, results: &ResultView) -> Result<(), DomError> {
        self.set_result_text(&self.label, "", &results.label)?;
        self.set_result_text(&self.confidence, CONFIDENCE_PREFIX, &results.confidence)?;
        self.remedy.set_text_content(Some(&results.remedy));

        if let Some(list) = &self.top_k {
            list.set_text_content(None);
            for alternative in &results.alternatives {
                let item = self
                    .document
                    .create_element("li")
                    .map_err(|e| DomError::js(&e))?;
                item.set_text_content(Some(alternative));
                list.append_child(&item).map_err(|e| DomError::js(&e))?;
            }
        }
        Ok(())
    }

    /// Replace the region's content with `prefix` followed by a value span.
    fn set_result_text(
        &self,
        region: &HtmlElement,
        prefix: &str,
        value: &str,
    ) -> Result<(), DomError> {
        region.set_text_content(if prefix.is_empty() { None } else { Some(prefix) });
        let span = self
            .document
            .create_element("span")
            .map_err(|e| DomError::js(&e))?;
        span.set_class_name(RESULT_TEXT_CLASS);
        span.set_text_content(Some(value));
        region.append_child(&span).map_err(|e| DomError::js(&e))?;
        Ok(())
    }
}
