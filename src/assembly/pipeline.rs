use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::{info, warn};

use crate::archive;
use crate::artifacts::{Artifact, DOCS_ARTIFACT, WEBAPP_DIR_ARTIFACT, WEBAPP_WAR_ARTIFACT};
use crate::classifier::{CandidatePath, Classification, Classifier};
use crate::compiler::{self, CommandCompiler, CompilerInvoker};
use crate::config::AppConfig;
use crate::generator::{
    write_descriptors, DescriptorModel, APPLICATION_CONTEXT_XML, DISPATCHER_SERVLET_XML,
    SECURITY_CONTEXT_XML, WEB_XML,
};
use crate::manifest::{Manifest, CLASS_PATH_ATTRIBUTE};

use super::context::AssemblyContext;

/// Runs the assembly steps for one configuration.
pub struct Assembler {
    config: AppConfig,
    ctx: AssemblyContext,
    compiler: Box<dyn CompilerInvoker>,
}

impl Assembler {
    pub fn new(config: AppConfig, ctx: AssemblyContext) -> Self {
        Assembler {
            config,
            ctx,
            compiler: Box::new(CommandCompiler::default()),
        }
    }

    /// Replace the compiler delegation target (tests, alternate toolchains).
    pub fn with_compiler(mut self, compiler: Box<dyn CompilerInvoker>) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn context(&self) -> &AssemblyContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut AssemblyContext {
        &mut self.ctx
    }

    /// Run all four steps in order.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.generate()?;
        self.compile()?;
        self.build()?;
        self.package()?;
        Ok(())
    }

    /// Generate the deployment descriptors.
    pub fn generate(&self) -> anyhow::Result<Vec<PathBuf>> {
        let model = DescriptorModel::from_config(&self.config)?;
        write_descriptors(&model, &self.ctx.generate_dir())
    }

    /// Compile the configured source sets and copy resources.
    pub fn compile(&self) -> anyhow::Result<()> {
        if !self.config.do_compile {
            info!("compilation has been disabled; no classes will be compiled, nor any resources copied");
            return Ok(());
        }

        let compile_dir = self.ctx.compile_dir();
        fs::create_dir_all(&compile_dir)?;
        let mut args = Vec::new();
        if self.config.compile_debug_info {
            args.push("-g".to_string());
        }
        // Later source sets may reference classes from earlier ones.
        let classpath = self.ctx.classpath_string(&[compile_dir.clone()]);

        for set in &self.ctx.source_sets {
            if let Some(companion) = &set.companion_classes {
                let companion = self.ctx.resolve(companion);
                if !companion.is_dir() {
                    bail!(
                        "Required dependency on the {} classes not found ({}).",
                        set.name,
                        companion.display()
                    );
                }
                info!(set = %set.name, "copying companion classes into the compile output");
                archive::copy_dir_contents(&companion, &compile_dir)?;
            }

            let dir = self.ctx.resolve(&set.dir);
            let sources = compiler::source_files(&dir);
            if sources.is_empty() {
                info!(set = %set.name, dir = %dir.display(), "no source files found, skipping");
                continue;
            }
            info!(set = %set.name, count = sources.len(), "compiling source set");
            self.compiler
                .invoke(&classpath, &compile_dir, &args, &sources)?;
        }

        compiler::copy_resources(&self.config.copy_resources, &self.ctx.base_dir, &compile_dir)
    }

    /// Classify the build classpath with the configured lib rules.
    ///
    /// Entries that no longer exist on disk are dropped from the candidate
    /// set before classification.
    pub fn classify_classpath(&self) -> anyhow::Result<Classification> {
        let classifier = Classifier::from_war_config(self.config.war.as_ref())?;
        let candidates: Vec<CandidatePath> = self
            .ctx
            .classpath
            .iter()
            .filter(|p| p.exists())
            .map(|p| CandidatePath::new(p.clone()))
            .collect();
        Ok(classifier.classify(&candidates))
    }

    /// Assemble the expanded webapp directory.
    pub fn build(&mut self) -> anyhow::Result<PathBuf> {
        let build_dir = self.ctx.build_dir();
        fs::create_dir_all(&build_dir)?;
        let war = self.config.war.clone();

        if let Some(pre_base) = war.as_ref().and_then(|w| w.pre_base.as_deref()) {
            self.apply_base(pre_base, &build_dir, "pre")?;
        }

        info!(dir = %build_dir.display(), "building the expanded webapp");
        let webinf = build_dir.join("WEB-INF");
        let webinf_classes = webinf.join("classes");
        let webinf_lib = webinf.join("lib");

        if self.config.do_compile && self.ctx.compile_dir().is_dir() {
            archive::copy_dir_contents(&self.ctx.compile_dir(), &webinf_classes)?;
        }

        if self.config.do_lib_copy {
            let classification = self.classify_classpath()?;
            for dir in &classification.bundle_dirs {
                info!(dir = %dir.display(), "adding directory contents to WEB-INF/classes");
                archive::copy_dir_contents(dir, &webinf_classes)?;
            }
            for lib in &classification.bundle_files {
                info!(lib = %lib.display(), "including in WEB-INF/lib");
                archive::copy_file_into(lib, &webinf_lib)?;
            }
            self.write_manifest(&build_dir, &classification)?;
        } else {
            info!("lib copy has been disabled; no libs will be copied, nor a manifest written");
        }

        self.place_descriptors(&webinf)?;

        // Documentation, exported wherever the config points.
        match self.ctx.registry.find(DOCS_ARTIFACT).cloned() {
            Some(artifact) => {
                let docs_dir = match war.as_ref().and_then(|w| w.docs_dir.as_deref()) {
                    Some(sub) => build_dir.join(sub),
                    None => build_dir.clone(),
                };
                fs::create_dir_all(&docs_dir)?;
                artifact.export_to(&docs_dir)?;
            }
            None => warn!("no documentation artifact found"),
        }

        // Client application bundles.
        let client_dest = match war.as_ref().and_then(|w| w.client_app_dir.as_deref()) {
            Some(sub) => build_dir.join(sub),
            None => build_dir.clone(),
        };
        for app_dir in self.ctx.client_app_dirs.clone() {
            let app_dir = self.ctx.resolve(&app_dir);
            if app_dir.is_dir() {
                info!(dir = %app_dir.display(), "copying client application");
                archive::copy_dir_contents(&app_dir, &client_dest)?;
            } else {
                warn!(dir = %app_dir.display(), "client application directory not found, skipping");
            }
        }

        if let Some(post_base) = war.as_ref().and_then(|w| w.post_base.as_deref()) {
            self.apply_base(post_base, &build_dir, "post")?;
        }

        self.ctx
            .registry
            .add(Artifact::new("assembly", WEBAPP_DIR_ARTIFACT, &build_dir));
        Ok(build_dir)
    }

    /// Zip the expanded webapp into the final archive.
    pub fn package(&mut self) -> anyhow::Result<Option<PathBuf>> {
        if !self.config.do_package {
            info!("packaging has been disabled; no packaging will be performed");
            return Ok(None);
        }
        let war_file = self.ctx.package_dir().join(self.war_file_name());
        if let Some(parent) = war_file.parent() {
            fs::create_dir_all(parent)?;
        }
        info!(war = %war_file.display(), "creating archive");
        archive::zip_dir(&self.ctx.build_dir(), &war_file)?;
        self.ctx
            .registry
            .add(Artifact::new("assembly", WEBAPP_WAR_ARTIFACT, &war_file));
        Ok(Some(war_file))
    }

    /// The archive file name: configured name, else `<label>.war`, else a
    /// generic default.
    pub fn war_file_name(&self) -> String {
        if let Some(name) = self.config.war.as_ref().and_then(|w| w.name.clone()) {
            return name;
        }
        match &self.config.label {
            Some(label) => format!("{label}.war"),
            None => "application.war".to_string(),
        }
    }

    fn write_manifest(
        &self,
        build_dir: &Path,
        classification: &Classification,
    ) -> anyhow::Result<()> {
        let attrs = self
            .config
            .war
            .as_ref()
            .map(|w| w.manifest.as_slice())
            .unwrap_or(&[]);
        let mut manifest = Manifest::from_attributes(attrs);
        if !classification.manifest_classpath.is_empty()
            && manifest.main_attribute(CLASS_PATH_ATTRIBUTE).is_none()
        {
            manifest.set_main(
                CLASS_PATH_ATTRIBUTE,
                &classification.manifest_classpath.join(" "),
            );
        }
        let meta_inf = build_dir.join("META-INF");
        fs::create_dir_all(&meta_inf)?;
        fs::write(meta_inf.join("MANIFEST.MF"), manifest.render())
            .context("Failed to write MANIFEST.MF")
    }

    fn place_descriptors(&self, webinf: &Path) -> anyhow::Result<()> {
        let gen_dir = self.ctx.generate_dir();
        fs::create_dir_all(webinf)?;

        let web_xml_src = gen_dir.join(WEB_XML);
        let web_xml_dest = webinf.join(WEB_XML);
        match self
            .config
            .war
            .as_ref()
            .and_then(|w| w.web_xml_transform.as_deref())
        {
            Some(transform) => {
                let transform = self.ctx.resolve(transform);
                info!(template = %transform.display(), "transforming web.xml");
                transform_web_xml(&transform, &web_xml_src, &web_xml_dest)?;
            }
            None => archive::copy_file(&web_xml_src, &web_xml_dest)?,
        }

        archive::copy_file(
            &gen_dir.join(APPLICATION_CONTEXT_XML),
            &webinf.join(APPLICATION_CONTEXT_XML),
        )?;
        archive::copy_file(
            &gen_dir.join(DISPATCHER_SERVLET_XML),
            &webinf.join(DISPATCHER_SERVLET_XML),
        )?;
        if self.config.enable_security {
            archive::copy_file(
                &gen_dir.join(SECURITY_CONTEXT_XML),
                &webinf.join(SECURITY_CONTEXT_XML),
            )?;
        }

        for import in &self.config.spring_imports {
            if let Some(file) = &import.file {
                let src = self.ctx.resolve(file);
                archive::copy_file_into(&src, webinf)?;
            }
        }
        Ok(())
    }

    fn apply_base(&self, base: &Path, build_dir: &Path, which: &str) -> anyhow::Result<()> {
        let base = self.ctx.resolve(base);
        if base.is_dir() {
            info!(base = %base.display(), "copying {which}-base directory");
            archive::copy_dir_contents(&base, build_dir)
        } else {
            info!(base = %base.display(), "extracting {which}-base archive");
            archive::extract(&base, build_dir)
        }
        .with_context(|| format!("Failed to apply the {which}-base {}", base.display()))
    }
}

/// Pass the generated `web.xml` through a user-supplied transform template.
///
/// The template receives the generated descriptor as `web_xml` and its output
/// replaces the descriptor wholesale. Take care to preserve the existing
/// elements; losing them results in missing or malfunctioning endpoints.
fn transform_web_xml(template_path: &Path, source: &Path, dest: &Path) -> anyhow::Result<()> {
    let render = || -> anyhow::Result<String> {
        let template_src = fs::read_to_string(template_path)?;
        let source_xml = fs::read_to_string(source)?;
        let mut env = minijinja::Environment::new();
        env.add_template("transform", &template_src)?;
        let rendered = env
            .get_template("transform")?
            .render(minijinja::context! { web_xml => source_xml })?;
        Ok(rendered)
    };
    let rendered = render().with_context(|| {
        format!(
            "Error during transformation of the web.xml (template {}, file {})",
            template_path.display(),
            source.display()
        )
    })?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, rendered)
        .with_context(|| format!("Failed to write {}", dest.display()))?;
    Ok(())
}
