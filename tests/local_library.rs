use folder_sense::classify::{
    any_folder_song, classify_role, folder_albums, folder_artists, is_root_artists_folder,
    resolve_cover, resolve_folder_type,
};
use folder_sense::{
    album_name_for_song, Error, FileSystemGateway, FolderNameParser, FolderOrganizer, FolderRole,
    FolderType, LocalFileSystem, ScanConfig, ScanPipeline,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Paths of the on-disk test library
struct Library {
    _dir: TempDir,
    root: PathBuf,
    band: PathBuf,
    album: PathBuf,
    multi_disc: PathBuf,
    weird: PathBuf,
}

fn write(path: &Path, len: usize) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, vec![0u8; len]).unwrap();
}

/// Bands/
///   Emperor/
///     1994 - In the Nightside Eclipse/   two songs, FRONT.jpg, extra images
///     1997 - Anthems to the Welkin at Dusk/CD1, CD2
///     1999 - IX Equilibrium/              one song, one odd image, a hidden thumbnail
fn create_library() -> Library {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("Bands");
    let band = root.join("Emperor");
    let album = band.join("1994 - In the Nightside Eclipse");
    let multi_disc = band.join("1997 - Anthems to the Welkin at Dusk");
    let weird = band.join("1999 - IX Equilibrium");

    write(&album.join("01 - Into the Infinity of Thoughts.mp3"), 300);
    write(&album.join("02 - I Am the Black Wizards.mp3"), 200);
    write(&album.join("FRONT.jpg"), 10);
    write(&album.join("back.png"), 10);
    write(&album.join("info.txt"), 10);

    write(&multi_disc.join("CD1").join("01 - Ye Entrancemperium.mp3"), 120);
    write(&multi_disc.join("CD1").join("02 - Thus Spake the Nightspirit.mp3"), 80);
    write(&multi_disc.join("CD2").join("01 - Curse You All Men!.mp3"), 50);

    write(&weird.join("01 - Curse You All Men!.mp3"), 100);
    write(&weird.join("weirdName.jpg"), 10);
    write(&weird.join(".AlbumArtSmall.jpg"), 10);

    Library {
        _dir: dir,
        root,
        band,
        album,
        multi_disc,
        weird,
    }
}

#[test]
fn test_classify_local_library() {
    let lib = create_library();
    let fs = LocalFileSystem::new();

    assert_eq!(resolve_folder_type(&fs, &lib.band).unwrap(), FolderType::ArtistWithAlbums);
    assert_eq!(resolve_folder_type(&fs, &lib.album).unwrap(), FolderType::Album);
    assert_eq!(
        resolve_folder_type(&fs, &lib.multi_disc).unwrap(),
        FolderType::AlbumWithMultipleCDs
    );

    // a root of artists is not one of the three folder types
    assert!(matches!(
        resolve_folder_type(&fs, &lib.root),
        Err(Error::Classification { .. })
    ));
    assert!(is_root_artists_folder(&fs, &lib.root).unwrap());
    assert_eq!(classify_role(&fs, &lib.root).unwrap(), FolderRole::RootArtists);

    assert_eq!(folder_albums(&fs, &lib.band).unwrap().len(), 3);
    assert_eq!(folder_artists(&fs, &lib.root).unwrap(), vec![lib.band.clone()]);
}

#[test]
fn test_covers_on_disk() {
    let lib = create_library();
    let fs = LocalFileSystem::new();

    let cover = resolve_cover(&fs, &lib.album).unwrap().unwrap();
    assert_eq!(cover.name(), "FRONT.jpg");

    // the dotfile thumbnail is hidden, leaving one candidate
    let cover = resolve_cover(&fs, &lib.weird).unwrap().unwrap();
    assert_eq!(cover.name(), "weirdName.jpg");

    assert!(resolve_cover(&fs, &lib.band).unwrap().is_none());
}

#[test]
fn test_smallest_song_comes_from_first_disc() {
    let lib = create_library();
    let fs = LocalFileSystem::new();

    let song = any_folder_song(&fs, &lib.multi_disc).unwrap().unwrap();
    assert_eq!(song.name(), "02 - Thus Spake the Nightspirit.mp3");

    let song = any_folder_song(&fs, &lib.album).unwrap().unwrap();
    assert_eq!(song.len, 200);
}

#[test]
fn test_album_name_for_songs_on_disk() {
    let lib = create_library();
    let fs = LocalFileSystem::new();
    let parser = FolderNameParser::new();

    let song = lib.multi_disc.join("CD2").join("01 - Curse You All Men!.mp3");
    assert_eq!(
        album_name_for_song(&fs, &parser, &song).unwrap().as_deref(),
        Some("Anthems to the Welkin at Dusk")
    );

    let song = lib.album.join("01 - Into the Infinity of Thoughts.mp3");
    assert_eq!(
        album_name_for_song(&fs, &parser, &song).unwrap().as_deref(),
        Some("In the Nightside Eclipse")
    );
}

#[test]
fn test_scan_local_library() {
    let lib = create_library();
    let report = ScanPipeline::new(ScanConfig::new(lib.root.clone()), LocalFileSystem::new())
        .run()
        .unwrap();

    // root, band, three albums; CD1/CD2 belong to their album
    assert_eq!(report.folders.len(), 5);
    assert_eq!(report.counts.root_artists, 1);
    assert_eq!(report.counts.artists, 1);
    assert_eq!(report.counts.multi_disc_albums, 1);
    assert_eq!(report.counts.albums, 2);
    assert!(report.folder(&lib.multi_disc.join("CD1")).is_none());

    let multi_disc = report.folder(&lib.multi_disc).unwrap();
    assert_eq!(multi_disc.songs.len(), 3);
    assert!(multi_disc.songs.iter().all(|s| s.disc.is_some()));

    let album = report.folder(&lib.album).unwrap();
    assert_eq!(album.name.as_ref().unwrap().year, "1994");
    assert_eq!(album.songs.len(), 2);
    assert_eq!(report.song_failures(), 0);

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"multi-disc-album\""));
}

#[test]
fn test_scan_missing_root() {
    let dir = TempDir::new().unwrap();
    let result = ScanPipeline::new(
        ScanConfig::new(dir.path().join("missing")),
        LocalFileSystem::new(),
    )
    .run();
    assert!(result.is_err());
}

#[test]
fn test_organizer_on_disk() {
    let lib = create_library();
    let fs = LocalFileSystem::new();
    let organizer = FolderOrganizer::new(fs);
    let out = TempDir::new().unwrap();

    // copy keeps the source
    let copied = organizer.copy_folder(&lib.multi_disc, out.path()).unwrap();
    assert_eq!(copied, out.path().join("1997 - Anthems to the Welkin at Dusk"));
    assert!(copied.join("CD2").join("01 - Curse You All Men!.mp3").is_file());
    assert!(lib.multi_disc.exists());

    // move takes it away
    let moved = organizer
        .move_folder(&lib.weird, &out.path().join("Emperor"))
        .unwrap();
    assert!(moved.join("weirdName.jpg").is_file());
    assert!(!lib.weird.exists());

    // a cover is never overwritten
    let cover = organizer.save_cover_image(&moved, b"jpeg").unwrap();
    assert_eq!(fs::read(&cover).unwrap(), b"jpeg");
    assert!(organizer.save_cover_image(&moved, b"again").is_err());
    assert_eq!(fs::read(&cover).unwrap(), b"jpeg");
}

#[test]
fn test_read_only_file_is_locked_until_unlocked() {
    let lib = create_library();
    let fs = LocalFileSystem::new();
    let song = lib.album.join("01 - Into the Infinity of Thoughts.mp3");

    fs.set_read_only(&song, true).unwrap();
    let organizer = FolderOrganizer::new(fs);
    assert!(organizer.is_file_locked(&song).unwrap());

    organizer.unlock_file(&song).unwrap();
    assert!(!organizer.is_file_locked(&song).unwrap());
}

#[test]
fn test_validate_directory_on_disk() {
    let dir = TempDir::new().unwrap();
    let organizer = FolderOrganizer::new(LocalFileSystem::new());
    let target = dir.path().join("a").join("b");

    assert!(!organizer.validate_directory(&target, false).unwrap());
    assert!(organizer.validate_directory(&target, true).unwrap());
    assert!(target.is_dir());
}
