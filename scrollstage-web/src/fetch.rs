use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Fetch a URL and return the response body as bytes.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let window = web_sys::window().ok_or("no window")?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| format!("fetch failed for {url}: {e:?}"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "fetch did not return a Response".to_string())?;

    if !response.ok() {
        return Err(format!("fetch failed for {url}: HTTP {}", response.status()));
    }

    let buffer = response
        .array_buffer()
        .map_err(|e| format!("failed to read response body: {e:?}"))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| format!("failed to read response body: {e:?}"))?;

    Ok(Uint8Array::new(&buffer).to_vec())
}
