use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

/// Resolve the server home directory into an absolute path.
///
/// - `None` (or blank) => `<user home>/<default_subdir>`
/// - a leading `~` is expanded to the user home
/// - relative paths are joined onto the current working directory
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let user_home = || dirs::home_dir().ok_or_else(|| anyhow!("cannot determine user home"));

    let resolved = match configured.as_deref().map(str::trim) {
        None | Some("") => user_home()?.join(default_subdir),
        Some("~") => user_home()?,
        Some(raw) => {
            if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
                user_home()?.join(rest)
            } else {
                let p = PathBuf::from(raw);
                if p.is_absolute() {
                    p
                } else {
                    std::env::current_dir()
                        .context("cannot read current directory")?
                        .join(p)
                }
            }
        }
    };

    if create {
        std::fs::create_dir_all(&resolved)
            .with_context(|| format!("cannot create home dir {}", resolved.display()))?;
    }
    Ok(resolved)
}
