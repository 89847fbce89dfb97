//! Model intake on the browser side: streamed fetch with progress, then
//! glTF parse and Draco decode. Results go back to the session by ticket.

use crate::App;
use js_sys::{Reflect, Uint8Array};
use std::rc::Rc;
use tableau_core::{parse_glb, FetchOrder, LoadError, ModelSource, SceneModel};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn network(url: &str, err: impl std::fmt::Debug) -> LoadError {
    LoadError::Network {
        url: url.to_string(),
        reason: format!("{:?}", err),
    }
}

/// GET `url`, reporting `(loaded, total)` after every chunk.
pub async fn fetch_bytes(
    url: &str,
    mut progress: impl FnMut(u64, Option<u64>),
) -> Result<Vec<u8>, LoadError> {
    let window = web::window().ok_or_else(|| network(url, "no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| network(url, e))?
        .dyn_into()
        .map_err(|e| network(url, e))?;
    if !resp.ok() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    let total = resp
        .headers()
        .get("content-length")
        .ok()
        .flatten()
        .and_then(|v| v.trim().parse::<u64>().ok());

    let Some(body) = resp.body() else {
        // No stream support: take the whole buffer at once.
        let buf = JsFuture::from(resp.array_buffer().map_err(|e| network(url, e))?)
            .await
            .map_err(|e| network(url, e))?;
        let bytes = Uint8Array::new(&buf).to_vec();
        progress(bytes.len() as u64, total);
        return Ok(bytes);
    };

    let reader: web::ReadableStreamDefaultReader = body
        .get_reader()
        .dyn_into()
        .map_err(|e| network(url, e))?;
    let mut bytes: Vec<u8> = Vec::with_capacity(total.unwrap_or(0) as usize);
    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|e| network(url, e))?;
        let done = Reflect::get(&chunk, &JsValue::from_str("done"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            break;
        }
        let value = Reflect::get(&chunk, &JsValue::from_str("value")).map_err(|e| network(url, e))?;
        let part: Uint8Array = value.dyn_into().map_err(|e| network(url, e))?;
        let start = bytes.len();
        bytes.resize(start + part.length() as usize, 0);
        part.copy_to(&mut bytes[start..]);
        progress(bytes.len() as u64, total);
    }
    Ok(bytes)
}

/// Parse a `.glb` and run every Draco primitive through the decoder.
pub async fn decode_model(bytes: &[u8]) -> Result<SceneModel, LoadError> {
    let mut parsed = parse_glb(bytes)?;
    let requests = std::mem::take(&mut parsed.draco);
    if !requests.is_empty() {
        log::info!("[fetch] {} Draco primitive(s) to decode", requests.len());
    }
    for request in &requests {
        let decoded = draco::decode(request).await?;
        tableau_core::apply_decoded(&mut parsed.model, request, &decoded)?;
    }
    parsed.into_model()
}

#[cfg(feature = "draco")]
mod draco {
    use draco_decoder::{decode_mesh, AttributeDataType, MeshDecodeConfig};
    use tableau_core::{ComponentType, DracoRequest, LoadError};

    fn data_type(c: ComponentType) -> AttributeDataType {
        match c {
            ComponentType::F32 => AttributeDataType::Float32,
            ComponentType::U32 => AttributeDataType::UInt32,
            ComponentType::U16 => AttributeDataType::UInt16,
            ComponentType::I16 => AttributeDataType::Int16,
            ComponentType::U8 => AttributeDataType::UInt8,
            ComponentType::I8 => AttributeDataType::Int8,
        }
    }

    pub async fn decode(request: &DracoRequest) -> Result<Vec<u8>, LoadError> {
        let mut cfg = MeshDecodeConfig::new(request.vertex_count, request.index_count);
        for attr in &request.attributes {
            cfg.add_attribute(attr.dimensions, data_type(attr.component));
        }
        decode_mesh(&request.bytes, &cfg)
            .await
            .into_iter()
            .next()
            .ok_or_else(|| {
                LoadError::DracoDecode(format!("decoder rejected node {}", request.node))
            })
    }
}

#[cfg(not(feature = "draco"))]
mod draco {
    use tableau_core::{DracoRequest, LoadError};

    pub async fn decode(request: &DracoRequest) -> Result<Vec<u8>, LoadError> {
        Err(LoadError::DracoDecode(format!(
            "node {} is Draco-compressed but the decoder is not built in",
            request.node
        )))
    }
}

/// Run a fetch the session ordered. `file` carries the dropped file for
/// [`ModelSource::Dropped`] orders.
pub fn spawn_load(app: Rc<App>, order: FetchOrder, file: Option<web::File>) {
    spawn_local(async move {
        let ticket = order.ticket;
        let result = load(&app, &order, file).await;
        if let Err(e) = &result {
            log::warn!("[fetch] #{} {}: {}", ticket, order.source.describe(), e);
        }
        app.on_model_ready(ticket, result);
    });
}

async fn load(app: &Rc<App>, order: &FetchOrder, file: Option<web::File>) -> Result<SceneModel, LoadError> {
    let ticket = order.ticket;
    let (url, object_url) = match (&order.source, file) {
        (ModelSource::Path(path), _) => (path.clone(), false),
        (ModelSource::Dropped(name), Some(file)) => {
            let url = web::Url::create_object_url_with_blob(&file).map_err(|e| network(name, e))?;
            (url, true)
        }
        (ModelSource::Dropped(name), None) => return Err(network(name, "dropped file missing")),
    };

    let progress_app = app.clone();
    let fetched = fetch_bytes(&url, move |loaded, total| {
        progress_app.on_fetch_progress(ticket, loaded, total);
    })
    .await;
    if object_url {
        _ = web::Url::revoke_object_url(&url);
    }
    let bytes = fetched?;
    log::info!("[fetch] #{} {} bytes", ticket, bytes.len());
    decode_model(&bytes).await
}
