//! Library scan orchestration

use super::config::ScanConfig;
use super::report::{FolderReport, ScanReport, SongReport};
use crate::classify::{
    classify_role, disc_folders, folder_songs, is_disc_folder_name, resolve_cover,
};
use crate::error::{GatewayError, Result};
use crate::fs::{leaf_name, FileSystemGateway};
use crate::model::{AlbumType, FolderRole};
use crate::parse::{FolderNameParser, SongNameParser};
use rayon::prelude::*;
use std::path::Path;

/// Walks a library tree and classifies every folder in it
pub struct ScanPipeline<G: FileSystemGateway + Sync> {
    config: ScanConfig,
    gateway: G,
    folder_parser: FolderNameParser,
    song_parser: SongNameParser,
}

impl<G: FileSystemGateway + Sync> ScanPipeline<G> {
    /// Create a new scan pipeline
    pub fn new(config: ScanConfig, gateway: G) -> Self {
        let folder_parser = FolderNameParser::new().with_timeout(config.match_timeout);
        let song_parser = SongNameParser::new().with_timeout(config.match_timeout);

        Self {
            config,
            gateway,
            folder_parser,
            song_parser,
        }
    }

    /// Run the complete scan
    pub fn run(&self) -> Result<ScanReport> {
        let root = &self.config.root;
        log::info!("Scanning library at {:?}", root);

        if !self.gateway.dir_exists(root) {
            return Err(GatewayError::NotFound(root.clone()).into());
        }

        // Step 1: Collect folders (sequential, the gateway decides the order)
        let folders = self.gateway.walk_dirs(root, self.config.max_depth)?;
        log::info!("Found {} folders", folders.len());

        // Step 2: Classify each folder independently, disc folders excepted
        let reports = folders
            .par_iter()
            .map(|dir| self.scan_folder(dir))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect();

        let report = ScanReport::new(root.clone(), reports);
        log::info!(
            "Scan complete: {} albums, {} multi-disc albums, {} artists, {} unclassified",
            report.counts.albums,
            report.counts.multi_disc_albums,
            report.counts.artists,
            report.counts.unclassified
        );

        let failures = report.song_failures();
        if failures > 0 {
            log::warn!("{} song file names could not be parsed", failures);
        }

        Ok(report)
    }

    /// `None` for a disc folder, which is reported through its album
    fn scan_folder(&self, dir: &Path) -> Result<Option<FolderReport>> {
        if self.is_album_disc(dir)? {
            log::debug!("{:?} is a disc of its parent album", dir);
            return Ok(None);
        }

        let role = classify_role(&self.gateway, dir)?;
        log::debug!("{:?} is {}", dir, role);

        let mut report = FolderReport::new(dir.to_path_buf(), role);
        if !role.is_album() {
            return Ok(Some(report));
        }

        let name = leaf_name(dir);
        report.name = Some(self.folder_parser.parse(&name)?);
        report.album_type = Some(AlbumType::from_folder_name(&name));
        report.cover = resolve_cover(&self.gateway, dir)?;

        if self.config.parse_songs {
            report.songs = self.scan_songs(dir, None)?;
            if role == FolderRole::MultiDiscAlbum {
                for disc in disc_folders(&self.gateway, dir)? {
                    let songs = self.scan_songs(&disc, Some(leaf_name(&disc)))?;
                    report.songs.extend(songs);
                }
            }
        }

        Ok(Some(report))
    }

    /// A `CD1`/`Disc1` folder below the scan root whose parent resolves to a
    /// multi-disc album
    fn is_album_disc(&self, dir: &Path) -> Result<bool> {
        if dir == self.config.root.as_path() || !is_disc_folder_name(&leaf_name(dir)) {
            return Ok(false);
        }
        match dir.parent() {
            Some(parent) => {
                Ok(classify_role(&self.gateway, parent)? == FolderRole::MultiDiscAlbum)
            }
            None => Ok(false),
        }
    }

    fn scan_songs(&self, dir: &Path, disc: Option<String>) -> Result<Vec<SongReport>> {
        let songs = folder_songs(&self.gateway, dir)?;
        Ok(songs
            .iter()
            .map(|song| {
                let file_name = song.name();
                match self.song_parser.parse(&file_name) {
                    Ok(parsed) => SongReport {
                        file_name,
                        disc: disc.clone(),
                        parsed: Some(parsed),
                        error: None,
                    },
                    Err(e) => {
                        log::warn!("Skipping song name {:?}: {}", song.path, e);
                        SongReport {
                            file_name,
                            disc: disc.clone(),
                            parsed: None,
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .collect())
    }

    /// Root the pipeline scans from
    pub fn root(&self) -> &Path {
        &self.config.root
    }
}
