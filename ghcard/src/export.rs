// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Export of rendered cards to disk.
//!
//! An export writes the self-contained SVG document together with a JSON
//! manifest listing the username, layout, theme and visible data points.
//! Both files share the stem produced by [`ExportName`]. Writing is one-shot:
//! a failure is reported to the caller and never retried.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf}
};

use serde::Serialize;
use tracing::info;

use crate::{
    config::{ColorTheme, Layout},
    error::{self, Error},
    render::{CardDocument, DataPoint},
    slug::ExportName
};

/// Paths of the files produced by [`export_card`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedCard {
    /// Path to the SVG image.
    pub svg_path:      PathBuf,
    /// Path to the JSON manifest describing the card.
    pub manifest_path: PathBuf
}

#[derive(Serialize)]
struct CardManifest<'a> {
    username:    &'a str,
    layout:      Layout,
    theme:       ColorTheme,
    width:       u32,
    height:      u32,
    placeholder: bool,
    image:       String,
    data_points: &'a [DataPoint]
}

/// Writes `document` into `output_dir` as `<username>-<layout>.svg` plus a
/// JSON manifest with the same stem.
///
/// The directory is created when missing. Existing files with the same name
/// are overwritten.
///
/// # Errors
///
/// Returns [`Error::Validation`] when `username` yields no file name,
/// [`Error::Export`] when the directory or a file cannot be written and
/// [`Error::Serialize`] when the manifest cannot be encoded.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use ghcard::{CardConfig, Session, export_card};
///
/// # fn main() -> Result<(), ghcard::Error> {
/// let session = Session::new(CardConfig::default());
/// let exported = export_card(&session.render(), "octocat", Path::new("cards"))?;
/// println!("SVG: {}", exported.svg_path.display());
/// # Ok(())
/// # }
/// ```
pub fn export_card(
    document: &CardDocument,
    username: &str,
    output_dir: &Path
) -> Result<ExportedCard, Error> {
    let stem = ExportName::builder(username, document.layout())
        .build()
        .ok_or_else(|| Error::validation("a username is required to name the exported card"))?;

    fs::create_dir_all(output_dir).map_err(|source| error::export_io_error(output_dir, source))?;

    let svg_path = output_dir.join(format!("{stem}.svg"));
    let manifest_path = output_dir.join(format!("{stem}.json"));

    write_svg(&svg_path, document)?;
    write_manifest(&manifest_path, document, username.trim(), &svg_path)?;

    info!("Exported {} card to {}", document.layout(), svg_path.display());
    Ok(ExportedCard {
        svg_path,
        manifest_path
    })
}

fn write_svg(path: &Path, document: &CardDocument) -> Result<(), Error> {
    let file = File::create(path).map_err(|source| error::export_io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(document.svg().as_bytes())
        .map_err(|source| error::export_io_error(path, source))?;
    writer
        .flush()
        .map_err(|source| error::export_io_error(path, source))
}

fn write_manifest(
    path: &Path,
    document: &CardDocument,
    username: &str,
    svg_path: &Path
) -> Result<(), Error> {
    let manifest = CardManifest {
        username,
        layout: document.layout(),
        theme: document.theme(),
        width: document.width(),
        height: document.height(),
        placeholder: document.is_placeholder(),
        image: svg_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        data_points: document.data_points()
    };

    let file = File::create(path).map_err(|source| error::export_io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &manifest)?;
    writer
        .write_all(b"\n")
        .map_err(|source| error::export_io_error(path, source))?;
    writer
        .flush()
        .map_err(|source| error::export_io_error(path, source))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::Value;
    use tempfile::tempdir;

    use super::export_card;
    use crate::{
        config::{CardConfig, ColorTheme, Layout},
        error::Error,
        render::{render_card, testing::Fixture}
    };

    #[test]
    fn writes_svg_and_manifest_named_after_user_and_layout() {
        let dir = tempdir().expect("tempdir");
        let fixture = Fixture::new(CardConfig {
            layout: Layout::Receipt,
            color_theme: ColorTheme::Dark,
            ..CardConfig::default()
        });
        let document = render_card(&fixture.input());

        let exported = export_card(&document, "octocat", dir.path()).expect("export succeeds");
        assert_eq!(exported.svg_path, dir.path().join("octocat-receipt.svg"));
        assert_eq!(exported.manifest_path, dir.path().join("octocat-receipt.json"));

        let svg = fs::read_to_string(&exported.svg_path).expect("svg written");
        assert_eq!(svg, document.svg());
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg xmlns=\"http://www.w3.org/2000/svg\""));

        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(&exported.manifest_path).expect("manifest written"))
                .expect("manifest is JSON");
        assert_eq!(manifest["username"], "octocat");
        assert_eq!(manifest["layout"], "receipt");
        assert_eq!(manifest["theme"], "dark");
        assert_eq!(manifest["placeholder"], false);
        assert_eq!(manifest["image"], "octocat-receipt.svg");
        assert!(
            manifest["data_points"]
                .as_array()
                .expect("data points array")
                .iter()
                .any(|point| point["field"] == "login" && point["value"] == "octocat")
        );
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempdir().expect("tempdir");
        let nested = dir.path().join("cards").join("2024");
        let fixture = Fixture::new(CardConfig::default());

        let exported =
            export_card(&render_card(&fixture.input()), "octocat", &nested).expect("export succeeds");
        assert!(exported.svg_path.starts_with(&nested));
        assert!(exported.svg_path.exists());
    }

    #[test]
    fn blank_username_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let fixture = Fixture::new(CardConfig::default());
        let error = export_card(&render_card(&fixture.input()), "  ", dir.path()).unwrap_err();
        assert!(matches!(error, Error::Validation { .. }));
        assert_eq!(fs::read_dir(dir.path()).expect("readable").count(), 0);
    }

    #[test]
    fn unwritable_destination_reports_export_error() {
        let dir = tempdir().expect("tempdir");
        let blocker = dir.path().join("occupied");
        fs::write(&blocker, "not a directory").expect("blocker written");
        let fixture = Fixture::new(CardConfig::default());

        let error = export_card(&render_card(&fixture.input()), "octocat", &blocker).unwrap_err();
        match error {
            Error::Export {
                path, ..
            } => assert_eq!(path, blocker),
            other => panic!("unexpected error variant: {other:?}")
        }
    }

    #[test]
    fn placeholder_exports_are_flagged() {
        let dir = tempdir().expect("tempdir");
        let mut fixture = Fixture::new(CardConfig::default());
        fixture.profile = None;

        let exported =
            export_card(&render_card(&fixture.input()), "octocat", dir.path()).expect("export succeeds");
        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(exported.manifest_path).expect("manifest"))
                .expect("manifest is JSON");
        assert_eq!(manifest["placeholder"], true);
        assert_eq!(manifest["data_points"][0]["field"], "placeholder");
    }
}
