//! Browser shell around [`UploadPredictController`].
//!
//! Owns the controller and the bound page elements, turns DOM events into
//! messages and carries out the commands the controller returns.

use std::cell::RefCell;
use std::rc::Rc;

use leafcheck_core::{AppConfig, Command, Message, SelectedFile, UploadPredictController};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Event, EventTarget, File, FileList, Url};

use crate::dom::{DomElements, DomError, describe_js_value};
use crate::fetch;

/// Drag events whose default browser handling is suppressed on the drop zone.
const DRAG_EVENTS: [&str; 4] = ["dragenter", "dragover", "dragleave", "drop"];

pub struct Shell {
    controller: RefCell<UploadPredictController<File>>,
    dom: DomElements,
    window: web_sys::Window,
}

/// Bind to the page, wire its events and draw the initial state.
pub fn mount(config: AppConfig) -> Result<Rc<Shell>, DomError> {
    let window = web_sys::window().ok_or(DomError::NoWindow)?;
    let document = window.document().ok_or(DomError::NoDocument)?;
    let dom = DomElements::bind(&document)?;

    let shell = Rc::new(Shell {
        controller: RefCell::new(UploadPredictController::new(config)),
        dom,
        window,
    });
    shell.wire()?;

    let ui = shell.controller.borrow().view();
    shell.dom.render(&ui);
    Ok(shell)
}

/// Stage a browser file with a fresh object URL for its preview.
fn stage(file: File) -> SelectedFile<File> {
    let preview_url = Url::create_object_url_with_blob(&file).unwrap_or_else(|e| {
        log::error!(
            "Failed to create preview URL for {}: {}",
            file.name(),
            describe_js_value(&e)
        );
        String::new()
    });
    let name = file.name();
    SelectedFile::new(file, name, preview_url)
}

fn first_file(files: Option<FileList>) -> Option<SelectedFile<File>> {
    files.and_then(|list| list.get(0)).map(stage)
}

impl Shell {
    /// Feed one message through the controller, run its commands, re-render.
    pub fn dispatch(self: &Rc<Self>, message: Message<File>) {
        let commands = self.controller.borrow_mut().update(message);
        for command in commands {
            self.run(command);
        }
        let ui = self.controller.borrow().view();
        self.dom.render(&ui);
    }

    fn run(self: &Rc<Self>, command: Command<File>) {
        match command {
            Command::Alert(text) => {
                if let Err(e) = self.window.alert_with_message(&text) {
                    log::warn!("Alert failed: {}", describe_js_value(&e));
                }
            }
            Command::ReleasePreview(url) => {
                if url.is_empty() {
                    return;
                }
                if let Err(e) = Url::revoke_object_url(&url) {
                    log::warn!("Failed to revoke {}: {}", url, describe_js_value(&e));
                }
            }
            Command::SendPrediction(request) => {
                log::info!("📤 Uploading {} to {}", request.file_name, request.endpoint);
                let shell = Rc::clone(self);
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = fetch::post_file(&request).await;
                    shell.dispatch(Message::PredictionCompleted(outcome));
                });
            }
        }
    }

    fn wire(self: &Rc<Self>) -> Result<(), DomError> {
        self.listen(&self.dom.file_input, "change", |shell, _event| {
            let file = first_file(shell.dom.file_input.files());
            shell.dispatch(Message::FileSelected(file));
        })?;

        for name in DRAG_EVENTS {
            self.listen(&self.dom.drop_zone, name, |_shell, event| {
                event.prevent_default();
                event.stop_propagation();
            })?;
        }

        self.listen(&self.dom.drop_zone, "dragenter", |shell, _event| {
            shell.dispatch(Message::DragEntered);
        })?;
        self.listen(&self.dom.drop_zone, "dragleave", |shell, _event| {
            shell.dispatch(Message::DragLeft);
        })?;
        self.listen(&self.dom.drop_zone, "drop", |shell, event| {
            let files = event
                .dyn_ref::<DragEvent>()
                .and_then(DragEvent::data_transfer)
                .and_then(|transfer| transfer.files());
            // Mirror the drop into the input so it reflects what was chosen.
            if let Some(list) = &files {
                shell.dom.file_input.set_files(Some(list));
            }
            shell.dispatch(Message::Dropped(first_file(files)));
        })?;

        self.listen(&self.dom.predict_button, "click", |shell, _event| {
            shell.dispatch(Message::SubmitRequested);
        })?;

        log::debug!("Event listeners attached");
        Ok(())
    }

    fn listen(
        self: &Rc<Self>,
        target: &EventTarget,
        event: &str,
        handler: impl Fn(&Rc<Shell>, Event) + 'static,
    ) -> Result<(), DomError> {
        let shell = Rc::clone(self);
        let closure =
            Closure::wrap(Box::new(move |e: Event| handler(&shell, e)) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| DomError::js(&e))?;
        // Listeners live as long as the page.
        closure.forget();
        Ok(())
    }
}
