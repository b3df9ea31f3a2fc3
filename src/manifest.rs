//! JAR-style manifest assembly for the packaged webapp.
//!
//! A manifest is an ordered list of main-section attributes plus any number of
//! named sections. Attribute order is preserved as declared so the written
//! `MANIFEST.MF` is stable across builds.

use std::fmt::Write as _;

use crate::config::ManifestAttribute;

/// Name of the main-section attribute listing excluded-but-referenced jars.
pub const CLASS_PATH_ATTRIBUTE: &str = "Class-Path";

/// An in-memory `META-INF/MANIFEST.MF`.
#[derive(Debug, Clone)]
pub struct Manifest {
    main: Vec<(String, String)>,
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl Default for Manifest {
    fn default() -> Self {
        Manifest {
            main: vec![
                ("Manifest-Version".to_string(), "1.0".to_string()),
                (
                    "Created-By".to_string(),
                    format!("warpack {}", env!("CARGO_PKG_VERSION")),
                ),
            ],
            sections: Vec::new(),
        }
    }
}

impl Manifest {
    /// Build a manifest from configured attributes, starting from the defaults.
    ///
    /// Attributes without a `section` land in the main section; a configured
    /// attribute overrides a default of the same name.
    pub fn from_attributes(attributes: &[ManifestAttribute]) -> Self {
        let mut manifest = Manifest::default();
        for attr in attributes {
            match &attr.section {
                None => manifest.set_main(&attr.name, &attr.value),
                Some(section) => manifest.set_section(section, &attr.name, &attr.value),
            }
        }
        manifest
    }

    /// Look up a main-section attribute by name.
    pub fn main_attribute(&self, name: &str) -> Option<&str> {
        self.main
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set (or replace) a main-section attribute.
    pub fn set_main(&mut self, name: &str, value: &str) {
        if let Some(entry) = self
            .main
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            entry.1 = value.to_string();
        } else {
            self.main.push((name.to_string(), value.to_string()));
        }
    }

    /// Set (or replace) an attribute in a named section, creating the section
    /// on first use.
    pub fn set_section(&mut self, section: &str, name: &str, value: &str) {
        let entries = match self.sections.iter_mut().find(|(s, _)| s == section) {
            Some((_, entries)) => entries,
            None => {
                self.sections.push((section.to_string(), Vec::new()));
                &mut self.sections.last_mut().unwrap().1
            }
        };
        if let Some(entry) = entries.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            entry.1 = value.to_string();
        } else {
            entries.push((name.to_string(), value.to_string()));
        }
    }

    /// Render the manifest in JAR manifest format.
    ///
    /// Lines longer than 72 bytes are folded with a leading-space continuation
    /// line, per the manifest format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.main {
            write_attribute(&mut out, name, value);
        }
        for (section, entries) in &self.sections {
            out.push('\n');
            write_attribute(&mut out, "Name", section);
            for (name, value) in entries {
                write_attribute(&mut out, name, value);
            }
        }
        out.push('\n');
        out
    }
}

fn write_attribute(out: &mut String, name: &str, value: &str) {
    let mut line = format!("{name}: {value}");
    while line.len() > 72 {
        let mut cut = 72;
        while !line.is_char_boundary(cut) {
            cut -= 1;
        }
        let _ = writeln!(out, "{}", &line[..cut]);
        line = format!(" {}", &line[cut..]);
    }
    let _ = writeln!(out, "{line}");
}
