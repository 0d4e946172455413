use std::collections::HashMap;

use failure::Fail;
use web_sys::Document;

/// Resolves an element identifier to the text embedded in that element.
pub trait ShaderSourceLookup {
    /// Returns `None` when no element carries the `id`. An element without text content resolves
    /// to the empty string.
    fn text_content(&self, id: &str) -> Option<String>;
}

impl ShaderSourceLookup for Document {
    fn text_content(&self, id: &str) -> Option<String> {
        self.get_element_by_id(id)
            .map(|element| element.text_content().unwrap_or_default())
    }
}

impl<S> ShaderSourceLookup for HashMap<String, S>
where
    S: AsRef<str>,
{
    fn text_content(&self, id: &str) -> Option<String> {
        self.get(id).map(|source| source.as_ref().to_string())
    }
}

#[derive(Fail, Clone, PartialEq, Debug)]
#[fail(display = "No element with id `{}` to read shader source from", id)]
pub struct MissingShaderSource {
    pub id: String,
}

/// Reads the shader source embedded in the element identified by `id`, with leading and trailing
/// whitespace removed.
///
/// Internal whitespace (including line breaks) is left exactly as it is.
pub fn shader_source<L>(lookup: &L, id: &str) -> Result<String, MissingShaderSource>
where
    L: ShaderSourceLookup + ?Sized,
{
    let text = lookup.text_content(id).ok_or_else(|| MissingShaderSource {
        id: id.to_string(),
    })?;

    Ok(trim_whitespace(&text).to_string())
}

// Matches what a JavaScript `\s` matches: Unicode white space other than NEL (U+0085), plus the
// byte order mark.
fn trim_whitespace(text: &str) -> &str {
    text.trim_matches(|c: char| (c.is_whitespace() && c != '\u{0085}') || c == '\u{FEFF}')
}
