//! File operations: loading content documents and saving particle snapshots.
//!
//! This module handles native file dialogs and the browser-based file picker.
//! Results arrive over the channel in [`FileState`](super::state::FileState) and
//! are applied at the start of the next frame.

use super::state::{FileOperationResult, PortfolioApp};
use crate::content;
use eframe::egui;

impl PortfolioApp {
    /// Handles pending file operations for both native and WASM platforms.
    ///
    /// Completed operations from the channel are applied first, then newly
    /// requested operations are started.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for requesting repaints
    pub fn handle_pending_operations(&mut self, ctx: &egui::Context) {
        // First, process any completed file operations from the channel
        while let Ok(result) = self.file.receiver.try_recv() {
            self.apply_file_result(result);
        }

        // Handle pending load operations
        if std::mem::take(&mut self.file.pending_load) {
            let ctx = ctx.clone();
            let sender = self.file.sender.clone();

            #[cfg(target_arch = "wasm32")]
            {
                wasm_bindgen_futures::spawn_local(async move {
                    match Self::show_open_file_picker().await {
                        Some(file) => {
                            let filename = file.name();
                            let result = match Self::read_file(file).await {
                                Ok(json) => FileOperationResult::ContentLoaded(filename, json),
                                Err(e) => FileOperationResult::OperationFailed(e),
                            };
                            let _ = sender.send(result);
                        }
                        None => {
                            log::info!("Open dialog cancelled or API not supported");
                        }
                    }
                    ctx.request_repaint();
                });
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                tokio::spawn(async move {
                    if let Some(handle) = rfd::AsyncFileDialog::new()
                        .add_filter("JSON", &["json"])
                        .pick_file()
                        .await
                    {
                        let path = handle.path();
                        let result = match std::fs::read_to_string(path) {
                            Ok(json) => FileOperationResult::ContentLoaded(path.display().to_string(), json),
                            Err(e) => FileOperationResult::OperationFailed(format!("Failed to read file: {}", e)),
                        };
                        let _ = sender.send(result);
                    }
                    ctx.request_repaint();
                });
            }
        }

        // Handle pending snapshot saves
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(png) = self.file.pending_snapshot.take() {
                let ctx = ctx.clone();
                let sender = self.file.sender.clone();
                tokio::spawn(async move {
                    if let Some(handle) = rfd::AsyncFileDialog::new()
                        .add_filter("PNG", &["png"])
                        .set_file_name("particles.png")
                        .save_file()
                        .await
                    {
                        let path = handle.path();
                        let result = match std::fs::write(path, png) {
                            Ok(_) => FileOperationResult::SnapshotSaved(path.display().to_string()),
                            Err(e) => FileOperationResult::OperationFailed(format!("Failed to save file: {}", e)),
                        };
                        let _ = sender.send(result);
                    }
                    ctx.request_repaint();
                });
            }
        }
    }

    /// Applies one completed file operation.
    pub fn apply_file_result(&mut self, result: FileOperationResult) {
        match result {
            FileOperationResult::ContentLoaded(source, json) => match content::load_from_str(&json) {
                Ok(content) => {
                    log::info!("Loaded content from {}", source);
                    self.replace_content(content);
                    self.status = Some(format!("Loaded {}", source));
                    self.file.content_source = Some(source);
                }
                Err(e) => {
                    log::error!("Rejected content from {}: {}", source, e);
                    self.status = Some(e.to_string());
                }
            },
            FileOperationResult::SnapshotSaved(path) => {
                log::info!("Snapshot saved to {}", path);
                self.status = Some(format!("Saved {}", path));
            }
            FileOperationResult::OperationFailed(error) => {
                log::error!("File operation failed: {}", error);
                self.status = Some(error);
            }
        }
    }

    /// Opens a file dialog to load a content document.
    pub fn load_content(&mut self) {
        self.file.pending_load = true;
    }

    /// Switches back to the content compiled into the application.
    pub fn restore_builtin_content(&mut self) {
        self.replace_content(content::builtin());
        self.file.content_source = None;
        self.status = None;
    }

    /// Renders the hero background to PNG and asks where to save it.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_snapshot(&mut self) {
        let handle = self
            .sections
            .get(&super::state::SectionId::Hero)
            .and_then(|state| state.handle);
        let Some(field) = handle.and_then(|h| self.scheduler.field(h)) else {
            self.status = Some("Hero background is not running".to_string());
            return;
        };
        let background = if self.preferences.dark_mode {
            egui::Visuals::dark().panel_fill
        } else {
            egui::Visuals::light().panel_fill
        };
        match crate::snapshot::render_png(field, background) {
            Ok(png) => self.file.pending_snapshot = Some(png),
            Err(e) => {
                log::error!("Snapshot failed: {}", e);
                self.status = Some(e);
            }
        }
    }

    /// Opens a file picker dialog in the browser (WASM only).
    ///
    /// Creates a temporary file input element and waits for the user to select a file.
    ///
    /// # Returns
    ///
    /// The selected `File` object, or `None` if the user cancelled or the operation failed.
    #[cfg(target_arch = "wasm32")]
    async fn show_open_file_picker() -> Option<web_sys::File> {
        use eframe::wasm_bindgen::closure::Closure;
        use eframe::wasm_bindgen::JsCast;

        let window = web_sys::window()?;
        let document = window.document()?;

        let input = document
            .create_element("input")
            .ok()?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()?;

        input.set_type("file");
        input.set_accept(".json,application/json");
        input.style().set_property("display", "none").ok()?;

        let (sender, receiver) = futures::channel::oneshot::channel::<Option<web_sys::File>>();
        let sender = std::rc::Rc::new(std::cell::RefCell::new(Some(sender)));

        let onchange = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let input = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());

            if let Some(input) = input {
                let file = input.files().and_then(|files| files.get(0));
                if let Some(sender) = sender.borrow_mut().take() {
                    let _ = sender.send(file);
                }
            }
        }) as Box<dyn FnMut(_)>);

        input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget();

        document.body()?.append_child(&input).ok()?;
        input.click();

        let file = receiver.await.ok()??;

        document.body()?.remove_child(&input).ok()?;

        Some(file)
    }

    /// Reads a browser `File` as text (WASM only).
    #[cfg(target_arch = "wasm32")]
    async fn read_file(file: web_sys::File) -> Result<String, String> {
        use eframe::wasm_bindgen::closure::Closure;
        use eframe::wasm_bindgen::{JsCast, JsValue};

        let file_reader =
            web_sys::FileReader::new().map_err(|_| "Failed to create FileReader".to_string())?;

        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let reader = file_reader.clone();

            let onload = Closure::wrap(Box::new(move |_event: web_sys::ProgressEvent| {
                if let Ok(result) = reader.result() {
                    let _ = resolve.call1(&JsValue::NULL, &result);
                }
            }) as Box<dyn FnMut(_)>);
            file_reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let onerror = Closure::wrap(Box::new(move |_event: web_sys::ProgressEvent| {
                let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("Failed to read file"));
            }) as Box<dyn FnMut(_)>);
            file_reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();
        });

        file_reader
            .read_as_text(&file)
            .map_err(|_| "Failed to start reading file".to_string())?;

        let result = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| format!("Failed to read file: {:?}", e))?;

        result
            .as_string()
            .ok_or_else(|| "File content is not a string".to_string())
    }
}
