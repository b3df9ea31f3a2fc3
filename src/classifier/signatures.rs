//! Built-in fingerprints of known build-time-only archives.
//!
//! Each signature is the name of an entry whose presence identifies the
//! archive; the table is static data so new fingerprints are one line, and
//! the probe is testable in isolation against synthetic archives.

use std::fs::File;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

/// Archives carrying this entry are always bundled, overriding every exclude
/// rule. The escape hatch for api dependencies that would otherwise trip a
/// fingerprint.
pub const PRESERVE_MARKER: &str = "META-INF/enunciate/preserve-in-war";

/// A fingerprint for a known build-time-only archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Entry name probed for inside the archive.
    pub entry: &'static str,
    /// Human-readable identification, used as the exclusion reason.
    pub reason: &'static str,
}

/// The built-in exclusion table: archives that ship with the JDK or exist
/// only to run the build engine. Applied when `exclude_default_libs` is on.
pub const BUILD_TIME_SIGNATURES: &[Signature] = &[
    Signature {
        entry: "com/sun/tools/apt/Main.class",
        reason: "compiler tooling (tools.jar)",
    },
    Signature {
        entry: "net/sf/jelly/apt/Context.class",
        reason: "annotation-processing support (apt-jelly-core)",
    },
    Signature {
        entry: "net/sf/jelly/apt/freemarker/FreemarkerModel.class",
        reason: "annotation-processing template bindings (apt-jelly-freemarker)",
    },
    Signature {
        entry: "freemarker/template/Configuration.class",
        reason: "template engine (freemarker)",
    },
    Signature {
        entry: "org/codehaus/enunciate/main/Enunciate.class",
        reason: "build engine core",
    },
    Signature {
        entry: "javax/servlet/ServletContext.class",
        reason: "servlet api (provided by the container)",
    },
    Signature {
        entry: "org/codehaus/enunciate/modules/xfire_client/EnunciatedClientSoapSerializerHandler.class",
        reason: "client tooling archive",
    },
    Signature {
        entry: "META-INF/services/org.codehaus.enunciate.modules.DeploymentModule",
        reason: "build engine deployment module",
    },
    Signature {
        entry: "javax/swing/SwingBeanInfoBase.class",
        reason: "JDK dt.jar",
    },
    Signature {
        entry: "HTMLConverter.class",
        reason: "JDK htmlconverter.jar",
    },
    Signature {
        entry: "sun/tools/jconsole/JConsole.class",
        reason: "JDK jconsole.jar",
    },
    Signature {
        entry: "sun/jvm/hotspot/debugger/Debugger.class",
        reason: "JDK sa-jdi.jar",
    },
    Signature {
        entry: "sun/io/ByteToCharDoubleByte.class",
        reason: "JDK charsets.jar",
    },
    Signature {
        entry: "com/sun/deploy/ClientContainer.class",
        reason: "JDK deploy.jar",
    },
    Signature {
        entry: "com/sun/javaws/Globals.class",
        reason: "JDK javaws.jar",
    },
    Signature {
        entry: "javax/crypto/SecretKey.class",
        reason: "JDK jce.jar",
    },
    Signature {
        entry: "sun/net/www/protocol/https/HttpsClient.class",
        reason: "JDK jsse.jar",
    },
    Signature {
        entry: "sun/plugin/JavaRunTime.class",
        reason: "JDK plugin.jar",
    },
    Signature {
        entry: "com/sun/corba/se/impl/activation/ServerMain.class",
        reason: "JDK rt.jar",
    },
];

/// Result of probing one candidate archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveProbe {
    /// The archive carries [`PRESERVE_MARKER`].
    pub preserved: bool,
    /// First matching signature from [`BUILD_TIME_SIGNATURES`], if any.
    pub signature: Option<Signature>,
}

/// Probe a candidate archive for the preserve marker and the built-in
/// signatures.
///
/// The archive is opened directly and released when the probe returns; no
/// state is shared between candidates. Anything that is not a readable zip
/// archive (directories, corrupt files, plain files) probes clean.
pub fn probe_archive(path: &Path) -> ArchiveProbe {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) => {
            debug!(path = %path.display(), %err, "candidate not readable, probing clean");
            return ArchiveProbe::default();
        }
    };
    let archive = match ZipArchive::new(file) {
        Ok(a) => a,
        Err(err) => {
            debug!(path = %path.display(), %err, "candidate is not an archive, probing clean");
            return ArchiveProbe::default();
        }
    };

    if archive.index_for_name(PRESERVE_MARKER).is_some() {
        debug!(
            path = %path.display(),
            "known include: archive contains the entry {PRESERVE_MARKER}"
        );
        return ArchiveProbe {
            preserved: true,
            signature: None,
        };
    }

    for sig in BUILD_TIME_SIGNATURES {
        if archive.index_for_name(sig.entry).is_some() {
            debug!(path = %path.display(), reason = sig.reason, "known exclude");
            return ArchiveProbe {
                preserved: false,
                signature: Some(*sig),
            };
        }
    }
    ArchiveProbe::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn fake_jar(dir: &Path, name: &str, entries: &[&str]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        for entry in entries {
            writer
                .start_file(*entry, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"x").unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_probe_matches_compiler_tooling() {
        let dir = tempfile::tempdir().unwrap();
        let jar = fake_jar(dir.path(), "tools.jar", &["com/sun/tools/apt/Main.class"]);
        let probe = probe_archive(&jar);
        assert!(!probe.preserved);
        assert_eq!(
            probe.signature.map(|s| s.reason),
            Some("compiler tooling (tools.jar)")
        );
    }

    #[test]
    fn test_preserve_marker_wins_over_signature() {
        let dir = tempfile::tempdir().unwrap();
        let jar = fake_jar(
            dir.path(),
            "kept.jar",
            &[PRESERVE_MARKER, "freemarker/template/Configuration.class"],
        );
        let probe = probe_archive(&jar);
        assert!(probe.preserved);
        assert!(probe.signature.is_none());
    }

    #[test]
    fn test_clean_archive_probes_clean() {
        let dir = tempfile::tempdir().unwrap();
        let jar = fake_jar(dir.path(), "api.jar", &["com/myco/api/Service.class"]);
        let probe = probe_archive(&jar);
        assert!(!probe.preserved);
        assert!(probe.signature.is_none());
    }

    #[test]
    fn test_non_archive_probes_clean() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "not a zip").unwrap();
        let probe = probe_archive(&txt);
        assert!(!probe.preserved);
        assert!(probe.signature.is_none());
        // Missing files probe clean as well.
        let probe = probe_archive(&dir.path().join("missing.jar"));
        assert!(probe.signature.is_none());
    }
}
