use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use askama::Template;
use tracing::info;

use super::model::DescriptorModel;

/// File name of the generated servlet deployment descriptor.
pub const WEB_XML: &str = "web.xml";
/// File name of the generated root beans file.
pub const APPLICATION_CONTEXT_XML: &str = "application-context.xml";
/// File name of the generated dispatcher configuration.
pub const DISPATCHER_SERVLET_XML: &str = "dispatcher-servlet.xml";
/// File name of the generated security context (security builds only).
pub const SECURITY_CONTEXT_XML: &str = "security-context.xml";

#[derive(Template)]
#[template(path = "web.xml", escape = "none")]
struct WebXmlTemplate<'a> {
    model: &'a DescriptorModel,
}

#[derive(Template)]
#[template(path = "application-context.xml", escape = "none")]
struct ApplicationContextTemplate<'a> {
    model: &'a DescriptorModel,
}

#[derive(Template)]
#[template(path = "dispatcher-servlet.xml", escape = "none")]
struct DispatcherServletTemplate<'a> {
    model: &'a DescriptorModel,
}

#[derive(Template)]
#[template(path = "security-context.xml", escape = "none")]
struct SecurityContextTemplate<'a> {
    model: &'a DescriptorModel,
}

/// Render the deployment descriptors into `out_dir` and return the written
/// paths.
///
/// `security-context.xml` is only produced when security is enabled.
pub fn write_descriptors(model: &DescriptorModel, out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut written = Vec::new();
    written.push(render_into(
        out_dir,
        APPLICATION_CONTEXT_XML,
        ApplicationContextTemplate { model }.render(),
    )?);
    written.push(render_into(
        out_dir,
        DISPATCHER_SERVLET_XML,
        DispatcherServletTemplate { model }.render(),
    )?);
    written.push(render_into(out_dir, WEB_XML, WebXmlTemplate { model }.render())?);
    if model.security_enabled {
        written.push(render_into(
            out_dir,
            SECURITY_CONTEXT_XML,
            SecurityContextTemplate { model }.render(),
        )?);
    }
    Ok(written)
}

fn render_into(
    out_dir: &Path,
    name: &str,
    rendered: Result<String, askama::Error>,
) -> anyhow::Result<PathBuf> {
    let contents = rendered.with_context(|| format!("Failed to render {name}"))?;
    let path = out_dir.join(name);
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "generated descriptor");
    Ok(path)
}
