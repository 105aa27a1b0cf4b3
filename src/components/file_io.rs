//! Browser file access: reading a picked file, downloading the export.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
	Blob, BlobPropertyBag, DragEvent, Event, File, HtmlAnchorElement, HtmlInputElement, Url,
};

use crate::network::GraphModel;
use crate::network::ingest::{EXPORT_FILE_NAME, IngestError, to_pretty_json};

fn js_error(err: JsValue) -> IngestError {
	IngestError::Browser(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// The first file chosen in the `<input type="file">` that fired `ev`.
pub fn selected_file(ev: &Event) -> Option<File> {
	let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
	input.files()?.get(0)
}

/// The first file carried by a drop.
pub fn dropped_file(ev: &DragEvent) -> Option<File> {
	ev.data_transfer()?.files()?.get(0)
}

/// Reads the whole file as UTF-8 text.
pub async fn read_text(file: &File) -> Result<String, IngestError> {
	let text = JsFuture::from(file.text())
		.await
		.map_err(|e| IngestError::Read(e.as_string().unwrap_or_else(|| format!("{e:?}"))))?;
	text.as_string()
		.ok_or_else(|| IngestError::Read(format!("{} is not text", file.name())))
}

/// Offers `graph` as a pretty-printed JSON download.
pub fn download_json(graph: &GraphModel) -> Result<(), IngestError> {
	let json = to_pretty_json(graph)?;
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let parts = js_sys::Array::of1(&JsValue::from_str(&json));
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
	let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| IngestError::Browser("no document".into()))?;
	let link: HtmlAnchorElement = document
		.create_element("a")
		.map_err(js_error)?
		.dyn_into()
		.map_err(|_| IngestError::Browser("not an anchor element".into()))?;
	link.set_href(&url);
	link.set_download(EXPORT_FILE_NAME);
	link.click();

	Url::revoke_object_url(&url).map_err(js_error)
}
