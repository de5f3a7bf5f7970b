use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("failed to read template {name}: {source}")]
    Read { name: String, source: io::Error },
}

pub type TemplateResult<T> = Result<T, TemplateError>;

/// Substitution values for a render. The routes here all render with an
/// empty context.
pub type Context = HashMap<String, String>;

/// Renders HTML templates from a directory.
///
/// Templates are looked up as `<dir>/<name>.html` at render time, so edits
/// to a template source show up on the next request.
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        TemplateStore {
            dir: dir.as_ref().into(),
        }
    }

    /// Renders the named template, substituting `{{ key }}` placeholders
    /// from the context.
    pub async fn render(&self, name: &str, context: &Context) -> TemplateResult<String> {
        let path = self.dir.join(name).with_extension("html");
        let source = match tokio::fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(TemplateError::NotFound(name.to_string()));
            }
            Err(err) => {
                return Err(TemplateError::Read {
                    name: name.to_string(),
                    source: err,
                });
            }
        };
        Ok(substitute(&source, context))
    }
}

fn substitute(source: &str, context: &Context) -> String {
    context.iter().fold(source.to_string(), |html, (key, value)| {
        html.replace(&format!("{{{{ {key} }}}}"), value)
            .replace(&format!("{{{{{key}}}}}"), value)
    })
}
