//! 文件选择封装模块
//!
//! 把 `<input type="file">` 选中的文件读成核心库的 `Upload`。

use myndfull::shared::Upload;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement, Url};

/// 取出文件输入框当前选中的第一个文件
pub fn selected_file(ev: &Event) -> Option<File> {
    let input = ev.target()?.dyn_into::<HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// 读取整个文件内容
pub async fn read_upload(file: &File) -> Option<Upload> {
    let buffer = match JsFuture::from(file.array_buffer()).await {
        Ok(buffer) => buffer,
        Err(e) => {
            tracing::warn!(error = ?e, name = %file.name(), "failed to read file");
            return None;
        }
    };
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let mime = file.type_();
    Some(Upload {
        file_name: file.name(),
        mime: if mime.is_empty() {
            "application/octet-stream".to_string()
        } else {
            mime
        },
        bytes,
    })
}

/// 本地预览地址，使用完需调用 `revoke_preview`
pub fn preview_url(file: &File) -> Option<String> {
    Url::create_object_url_with_blob(file).ok()
}

pub fn revoke_preview(url: &str) {
    let _ = Url::revoke_object_url(url);
}
