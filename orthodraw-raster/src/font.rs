/// Font registration for text rendering
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::OnceLock;

use orthodraw_core::RenderError;
use plotters::style::FontStyle;

/// Environment variable naming a TrueType font to use instead of the bundled one
pub const FONT_ENV: &str = "ORTHODRAW_FONT";

/// DejaVu Sans, shipped so text renders the same on every machine
static BUNDLED: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

/// Where font bytes come from, in the order they are tried
#[derive(Debug, Clone, PartialEq)]
enum FontSource {
    File(PathBuf),
    Bundled,
}

/// Register the sans-serif family with plotters, once per process
pub fn ensure_sans_serif() -> Result<(), RenderError> {
    REGISTERED
        .get_or_init(|| register(sources(std::env::var_os(FONT_ENV))))
        .clone()
        .map_err(RenderError::Font)
}

fn sources(env: Option<OsString>) -> Vec<FontSource> {
    env.filter(|value| !value.is_empty())
        .map(|value| FontSource::File(PathBuf::from(value)))
        .into_iter()
        .chain(std::iter::once(FontSource::Bundled))
        .collect()
}

fn load(source: &FontSource) -> Option<&'static [u8]> {
    match source {
        FontSource::Bundled => Some(BUNDLED),
        FontSource::File(path) => match std::fs::read(path) {
            // plotters keeps registered fonts for the whole process
            Ok(bytes) => Some(Box::leak(bytes.into_boxed_slice())),
            Err(err) => {
                log::warn!("cannot read font {}: {err}", path.display());
                None
            }
        },
    }
}

fn register(sources: Vec<FontSource>) -> Result<(), String> {
    for source in &sources {
        let Some(bytes) = load(source) else {
            continue;
        };
        match plotters::style::register_font("sans-serif", FontStyle::Normal, bytes) {
            Ok(()) => {
                log::debug!("using font {source:?}");
                return Ok(());
            }
            Err(_) => log::warn!("ignoring unparsable font {source:?}"),
        }
    }
    Err(format!("no usable font among {} candidates", sources.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_font_is_tried_first() {
        let list = sources(Some(OsString::from("/tmp/orthodraw-font.ttf")));
        assert_eq!(
            list,
            vec![
                FontSource::File(PathBuf::from("/tmp/orthodraw-font.ttf")),
                FontSource::Bundled
            ]
        );
        assert_eq!(sources(None), vec![FontSource::Bundled]);
        assert_eq!(sources(Some(OsString::new())), vec![FontSource::Bundled]);
    }

    #[test]
    fn test_unreadable_file_falls_back_to_bundled() {
        let missing = FontSource::File(PathBuf::from("/nonexistent/orthodraw.ttf"));
        assert!(load(&missing).is_none());
        assert!(load(&FontSource::Bundled).is_some_and(|bytes| bytes.len() > 1000));
        assert!(register(vec![missing, FontSource::Bundled]).is_ok());
    }

    #[test]
    fn test_no_sources_is_an_error() {
        assert!(register(Vec::new()).is_err());
    }
}
