use serde::Deserialize;
use std::path::PathBuf;

use super::data::{ImageRef, ProjectEntry};
use crate::error::CatalogError;
use crate::media::delivery::{tier_url, ImageTier};

/// Catalog bundled with the binary, used when no other source is configured
const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Curated display names for folders whose raw names read poorly
const NAME_FIXES: &[(&str, &str)] = &[
    ("Gökçe Nefes", "Gökçe Nefes"),
    ("Gökçe Vital", "Gökçe Vital"),
    ("Gökçe parla 2023", "Gökçe Parla"),
    ("Gökçe yapı beosis iş merkezi 2021", "Gökçe Beosis"),
    ("Hüseyin aslantürk KONUT 2022", "Konut 2022"),
];

/// One record as produced by the asset pipeline
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    folder: String,
    #[serde(default)]
    folder_path: String,
    #[serde(default)]
    cover_image: String,
    #[serde(default)]
    images: Vec<ImageRef>,
    #[serde(default)]
    image_count: Option<usize>,
}

/// The static set of projects shown in the gallery.
/// Entries are immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    projects: Vec<ProjectEntry>,
}

impl Catalog {
    /// Load the catalog compiled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parse a catalog from its JSON form
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawProject> = serde_json::from_str(json)?;

        let projects = raw
            .into_iter()
            .enumerate()
            .map(|(index, item)| build_entry(index, item))
            .collect();

        Ok(Catalog { projects })
    }

    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Find a project by its sequential ID
    pub fn get(&self, id: usize) -> Option<&ProjectEntry> {
        self.projects.iter().find(|project| project.id == id)
    }
}

fn build_entry(index: usize, item: RawProject) -> ProjectEntry {
    let image_count = item.images.len();

    if let Some(declared) = item.image_count {
        if declared != image_count {
            tracing::warn!(
                folder = %item.folder,
                declared,
                actual = image_count,
                "imageCount does not match the image list, using the list length"
            );
        }
    }

    let name = NAME_FIXES
        .iter()
        .find(|(folder, _)| *folder == item.folder)
        .map(|(_, fixed)| fixed.to_string())
        .unwrap_or_else(|| item.folder.clone());

    ProjectEntry {
        id: index + 1,
        name,
        cover_image: tier_url(&item.cover_image, ImageTier::Cover),
        folder: item.folder,
        folder_path: item.folder_path,
        images: item.images,
        image_count,
    }
}

/// Async function to load a catalog file from disk
/// Runs on the background executor to avoid blocking the UI
pub async fn load_catalog_file(path: PathBuf) -> Result<Catalog, CatalogError> {
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| CatalogError::Read {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    let catalog = Catalog::from_json(&json)?;
    tracing::info!("📁 Loaded {} projects from {}", catalog.len(), path.display());

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {
            "folder": "Gökçe parla 2023",
            "folderPath": "projeler/Gökçe parla 2023",
            "coverImage": "https://res.cloudinary.com/demo/image/upload/v1/parla/cover.jpg",
            "images": [
                { "url": "https://res.cloudinary.com/demo/image/upload/v1/parla/01.jpg" },
                { "url": "https://res.cloudinary.com/demo/image/upload/v1/parla/02.jpg" }
            ],
            "imageCount": 2
        },
        {
            "folder": "Darıca depo",
            "folderPath": "projeler/Darıca depo",
            "coverImage": "",
            "images": [],
            "imageCount": 4
        }
    ]"#;

    #[test]
    fn test_from_json_builds_entries() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let parla = &catalog.projects()[0];
        assert_eq!(parla.id, 1);
        assert_eq!(parla.name, "Gökçe Parla");
        assert_eq!(parla.folder, "Gökçe parla 2023");
        assert_eq!(parla.image_count, 2);
        assert_eq!(
            parla.cover_image,
            "https://res.cloudinary.com/demo/image/upload/f_webp,q_100,w_600,c_fill/v1/parla/cover.jpg"
        );

        let depo = catalog.get(2).unwrap();
        assert_eq!(depo.name, "Darıca depo");
        assert_eq!(depo.cover_image, "");
        // Declared count of 4 is corrected to the list length
        assert_eq!(depo.image_count, 0);
        assert!(!depo.has_images());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = Catalog::from_json("{ not a list }");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        for project in catalog.projects() {
            assert_eq!(project.image_count, project.images.len());
        }
    }

    #[tokio::test]
    async fn test_load_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = load_catalog_file(file.path().to_path_buf()).await.unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_read_error() {
        let result = load_catalog_file(PathBuf::from("/nonexistent/catalog.json")).await;
        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }
}
