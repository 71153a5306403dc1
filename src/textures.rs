use crate::core::{decode_image, DecodedImage, TextureError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// A finished load waiting for the frame loop to upload it.
pub struct LoadedTexture {
    pub slot: usize,
    pub name: &'static str,
    pub outcome: Result<DecodedImage, TextureError>,
}

/// Handle to one in-flight load. Cancelling drops the result when it lands.
#[derive(Clone)]
pub struct TextureRequest {
    pub slot: usize,
    pub name: &'static str,
    cancelled: Rc<Cell<bool>>,
}

impl TextureRequest {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Default)]
pub struct TextureLoader {
    inbox: Rc<RefCell<Vec<LoadedTexture>>>,
    requests: Vec<TextureRequest>,
}

impl TextureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start fetching and decoding `url` into texture slot `slot`.
    pub fn request(&mut self, slot: usize, name: &'static str, url: &'static str) -> TextureRequest {
        let req = TextureRequest {
            slot,
            name,
            cancelled: Rc::new(Cell::new(false)),
        };
        self.requests.push(req.clone());
        let inbox = self.inbox.clone();
        let handle = req.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = match fetch_bytes(url).await {
                Ok(bytes) => decode_image(&bytes),
                Err(e) => Err(e),
            };
            let outcome = if handle.is_cancelled() {
                Err(TextureError::Cancelled)
            } else {
                outcome
            };
            match outcome {
                Err(TextureError::Cancelled) => {
                    log::debug!("[texture] {} load cancelled", handle.name);
                }
                outcome => inbox.borrow_mut().push(LoadedTexture {
                    slot: handle.slot,
                    name: handle.name,
                    outcome,
                }),
            }
        });
        req
    }

    /// Hand every finished load to `apply`, oldest first.
    pub fn drain(&mut self, mut apply: impl FnMut(LoadedTexture)) {
        let ready: Vec<LoadedTexture> = self.inbox.borrow_mut().drain(..).collect();
        if ready.is_empty() {
            return;
        }
        self.requests
            .retain(|r| !ready.iter().any(|l| l.slot == r.slot));
        for loaded in ready {
            apply(loaded);
        }
    }

    pub fn pending(&self) -> usize {
        self.requests.len()
    }

    pub fn cancel_all(&mut self) {
        for req in self.requests.drain(..) {
            req.cancel();
        }
        self.inbox.borrow_mut().clear();
    }
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, TextureError> {
    let opts = web::RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(web::RequestMode::Cors);
    let request = web::Request::new_with_str_and_init(url, &opts)
        .map_err(|e| TextureError::Fetch(format!("{:?}", e)))?;

    let window = web::window().ok_or_else(|| TextureError::Fetch("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| TextureError::Fetch(format!("{:?}", e)))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|_| TextureError::Fetch("not a Response".into()))?;
    if !resp.ok() {
        return Err(TextureError::Status(resp.status()));
    }
    let buffer = JsFuture::from(
        resp.array_buffer()
            .map_err(|e| TextureError::Fetch(format!("{:?}", e)))?,
    )
    .await
    .map_err(|e| TextureError::Fetch(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
