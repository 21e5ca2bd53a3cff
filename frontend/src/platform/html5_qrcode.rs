//! `Html5QrcodeScanner` (from the `html5-qrcode` script loaded by
//! `index.html`) exposed as a [`ScanDecoder`].
//!
//! The JS callback passed to `render` is created once per distinct
//! [`DecodeCallback`] and kept alive here, so restarting with the same
//! callback re-registers the same JS function.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use async_trait::async_trait;
use common::model::token::ScanToken;
use js_sys::{Object, Promise, Reflect};
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::describe_js_error;
use crate::config::{SCANNER_ASPECT_RATIO, SCANNER_FPS, SCANNER_QRBOX};
use crate::workflow::decoder::{DecodeCallback, DecoderError, ScanDecoder};

#[wasm_bindgen]
extern "C" {
    type Html5QrcodeScanner;

    #[wasm_bindgen(constructor, catch)]
    fn new(
        element_id: &str,
        config: &JsValue,
        verbose: bool,
    ) -> Result<Html5QrcodeScanner, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn render(this: &Html5QrcodeScanner, on_success: &js_sys::Function) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn clear(this: &Html5QrcodeScanner) -> Result<Promise, JsValue>;
}

struct Registration {
    callback: DecodeCallback,
    closure: Closure<dyn FnMut(String)>,
}

pub struct Html5QrcodeDecoder {
    element_id: String,
    scanner: RefCell<Option<Html5QrcodeScanner>>,
    registration: RefCell<Option<Registration>>,
}

impl Html5QrcodeDecoder {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            scanner: RefCell::new(None),
            registration: RefCell::new(None),
        }
    }

    fn register(&self, on_decode: DecodeCallback) {
        let mut registration = self.registration.borrow_mut();
        let reuse = registration
            .as_ref()
            .is_some_and(|current| Rc::ptr_eq(&current.callback, &on_decode));
        if reuse {
            return;
        }

        let callback = on_decode.clone();
        let closure = Closure::wrap(Box::new(move |text: String| {
            callback(ScanToken::from(text));
        }) as Box<dyn FnMut(String)>);
        *registration = Some(Registration {
            callback: on_decode,
            closure,
        });
    }
}

fn scanner_config() -> Result<JsValue, JsValue> {
    let qrbox = Object::new();
    Reflect::set(&qrbox, &"width".into(), &JsValue::from(SCANNER_QRBOX))?;
    Reflect::set(&qrbox, &"height".into(), &JsValue::from(SCANNER_QRBOX))?;

    let config = Object::new();
    Reflect::set(&config, &"fps".into(), &JsValue::from(SCANNER_FPS))?;
    Reflect::set(&config, &"qrbox".into(), &qrbox)?;
    Reflect::set(&config, &"aspectRatio".into(), &JsValue::from(SCANNER_ASPECT_RATIO))?;
    Ok(config.into())
}

#[async_trait(?Send)]
impl ScanDecoder for Html5QrcodeDecoder {
    async fn start(&self, on_decode: DecodeCallback) -> Result<(), DecoderError> {
        if self.scanner.borrow().is_some() {
            debug!("scanner already rendering into #{}", self.element_id);
            return Ok(());
        }

        self.register(on_decode);
        let start_error = |err: JsValue| DecoderError::Start(describe_js_error(&err));

        let config = scanner_config().map_err(start_error)?;
        let scanner =
            Html5QrcodeScanner::new(&self.element_id, &config, false).map_err(start_error)?;
        {
            let registration = self.registration.borrow();
            if let Some(registration) = registration.as_ref() {
                scanner
                    .render(registration.closure.as_ref().unchecked_ref())
                    .map_err(start_error)?;
            }
        }

        *self.scanner.borrow_mut() = Some(scanner);
        Ok(())
    }

    async fn stop(&self) -> Result<(), DecoderError> {
        let stop_error = |err: JsValue| DecoderError::Stop(describe_js_error(&err));
        let cleared = release(&self.scanner, |scanner| {
            let promise = scanner.clear().map_err(stop_error)?;
            Ok(async move { JsFuture::from(promise).await.map(drop).map_err(stop_error) })
        })
        .await?;
        if cleared {
            debug!("scanner cleared from #{}", self.element_id);
        }
        Ok(())
    }
}

/// Takes the instance out of `slot` and clears it. If clearing fails the
/// instance goes back into the slot, still owning its render target, so the
/// next `stop` retries it.
async fn release<T, F>(
    slot: &RefCell<Option<T>>,
    clear: impl FnOnce(&T) -> Result<F, DecoderError>,
) -> Result<bool, DecoderError>
where
    F: Future<Output = Result<(), DecoderError>>,
{
    let Some(instance) = slot.borrow_mut().take() else {
        return Ok(false);
    };

    let cleared = match clear(&instance) {
        Ok(pending) => pending.await,
        Err(err) => Err(err),
    };
    if let Err(err) = cleared {
        *slot.borrow_mut() = Some(instance);
        return Err(err);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use futures::future::{ready, Ready};

    use super::*;

    fn rejected(_: &&str) -> Result<Ready<Result<(), DecoderError>>, DecoderError> {
        Ok(ready(Err(DecoderError::Stop("clear rejected".into()))))
    }

    #[test]
    fn rejected_clear_keeps_the_instance() {
        let slot = RefCell::new(Some("scanner"));

        let err = block_on(release(&slot, rejected)).unwrap_err();
        assert_eq!(err, DecoderError::Stop("clear rejected".into()));
        assert_eq!(*slot.borrow(), Some("scanner"));

        let cleared = block_on(release(&slot, |_| Ok(ready(Ok(()))))).unwrap();
        assert!(cleared);
        assert_eq!(*slot.borrow(), None);
    }

    #[test]
    fn clear_that_throws_keeps_the_instance() {
        let slot = RefCell::new(Some("scanner"));
        let result = block_on(release(&slot, |_| {
            Err::<Ready<Result<(), DecoderError>>, _>(DecoderError::Stop("not running".into()))
        }));
        assert!(result.is_err());
        assert_eq!(*slot.borrow(), Some("scanner"));
    }

    #[test]
    fn empty_slot_is_already_stopped() {
        let slot: RefCell<Option<&str>> = RefCell::new(None);
        let cleared = block_on(release(&slot, rejected)).unwrap();
        assert!(!cleared);
    }
}
