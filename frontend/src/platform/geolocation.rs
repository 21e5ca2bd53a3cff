use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use common::model::coordinates::Coordinates;
use futures::channel::oneshot;
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::describe_js_error;
use crate::session::location::{LocationError, PositionSource};

/// `GeolocationPositionError.PERMISSION_DENIED`
const PERMISSION_DENIED: f64 = 1.0;

type Reply = Rc<RefCell<Option<oneshot::Sender<Result<Coordinates, LocationError>>>>>;

pub struct BrowserGeolocation;

#[async_trait(?Send)]
impl PositionSource for BrowserGeolocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        let navigator = web_sys::window()
            .map(|window| window.navigator())
            .ok_or(LocationError::Unsupported)?;
        let supported =
            Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false);
        if !supported {
            return Err(LocationError::Unsupported);
        }
        let geolocation = navigator
            .geolocation()
            .map_err(|_| LocationError::Unsupported)?;

        let (tx, rx) = oneshot::channel();
        let reply: Reply = Rc::new(RefCell::new(Some(tx)));

        let on_success: Closure<dyn FnMut(JsValue)> = {
            let reply = reply.clone();
            Closure::once(move |position: JsValue| {
                send(&reply, read_coordinates(&position));
            })
        };
        let on_error: Closure<dyn FnMut(JsValue)> = {
            let reply = reply.clone();
            Closure::once(move |error: JsValue| {
                send(&reply, Err(map_position_error(&error)));
            })
        };

        geolocation
            .get_current_position_with_error_callback(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
            )
            .map_err(|err| LocationError::Unavailable(describe_js_error(&err)))?;

        let result = rx
            .await
            .unwrap_or_else(|_| Err(LocationError::Unavailable("lookup abandoned".to_string())));
        drop(on_success);
        drop(on_error);
        result
    }
}

fn send(reply: &Reply, result: Result<Coordinates, LocationError>) {
    if let Some(tx) = reply.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

fn read_coordinates(position: &JsValue) -> Result<Coordinates, LocationError> {
    let coords = Reflect::get(position, &JsValue::from_str("coords"))
        .map_err(|err| LocationError::Unavailable(describe_js_error(&err)))?;
    let field = |name: &str| {
        Reflect::get(&coords, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_f64())
            .ok_or_else(|| LocationError::Unavailable(format!("position has no {}", name)))
    };
    Ok(Coordinates::new(field("latitude")?, field("longitude")?))
}

fn map_position_error(error: &JsValue) -> LocationError {
    let code = Reflect::get(error, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64());
    if code == Some(PERMISSION_DENIED) {
        LocationError::PermissionDenied
    } else {
        LocationError::Unavailable(describe_js_error(error))
    }
}
