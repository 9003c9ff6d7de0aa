use std::sync::{Arc, LazyLock};

use super::Svg;

const WINDOW_MAXIMIZE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
    <path d="M64 64H448V448H64Z M96 160V416H416V160Z"/>
</svg>"#;

const WINDOW_RESTORE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
    <path d="M160 64H448V352H400V112H160Z"/>
    <path d="M64 160H352V448H64Z M96 224V416H320V224Z"/>
</svg>"#;

static WINDOW_MAXIMIZE: LazyLock<Arc<Svg>> =
    LazyLock::new(|| Arc::new(Svg::must_from_str(WINDOW_MAXIMIZE_SVG)));

static WINDOW_RESTORE: LazyLock<Arc<Svg>> =
    LazyLock::new(|| Arc::new(Svg::must_from_str(WINDOW_RESTORE_SVG)));

/// A window frame, for "maximize".
pub fn window_maximize() -> Arc<Svg> {
    WINDOW_MAXIMIZE.clone()
}

/// Two overlapping window frames, for "restore".
pub fn window_restore() -> Arc<Svg> {
    WINDOW_RESTORE.clone()
}
