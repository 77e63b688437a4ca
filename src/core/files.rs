/// In-memory file store behind the file manager
///
/// Entries live in a flat list and carry their parent path. Folders scope the
/// listing: entering one shows only its direct children.

use chrono::Local;

use crate::core::error::{PanelError, PanelResult};
use crate::utils::constants::{JUST_NOW, SEED_FILES, SEED_NESTED_FILES};
use crate::utils::helpers::format_bytes;

pub const ROOT: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub id: u64,
    pub name: String,
    pub kind: FileKind,
    pub parent: String,
    pub size: Option<u64>,
    pub modified: String,
    pub content: Option<String>,
}

impl FileEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }

    /// Full path; folders end with a slash
    pub fn path(&self) -> String {
        match self.kind {
            FileKind::Folder => format!("{}{}/", self.parent, self.name),
            FileKind::File => format!("{}{}", self.parent, self.name),
        }
    }

    pub fn size_label(&self) -> Option<String> {
        self.size.map(format_bytes)
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    entries: Vec<FileEntry>,
    next_id: u64,
    cwd: String,
    search: String,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            cwd: ROOT.to_string(),
            search: String::new(),
        }
    }

    /// Store seeded with the sample server files
    pub fn new() -> Self {
        let mut store = Self::empty();

        for (name, is_folder, modified, content) in SEED_FILES {
            let kind = if *is_folder { FileKind::Folder } else { FileKind::File };
            store.insert(ROOT, name, kind, modified, content.map(str::to_string));
        }
        for (folder, name, content) in SEED_NESTED_FILES {
            let parent = format!("{}{}/", ROOT, folder);
            store.insert(&parent, name, FileKind::File, JUST_NOW, Some(content.to_string()));
        }

        store
    }

    fn insert(&mut self, parent: &str, name: &str, kind: FileKind, modified: &str, content: Option<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let size = match kind {
            FileKind::File => Some(content.as_deref().map(|c| c.len() as u64).unwrap_or(0)),
            FileKind::Folder => None,
        };

        self.entries.push(FileEntry {
            id,
            name: name.to_string(),
            kind,
            parent: parent.to_string(),
            size,
            modified: modified.to_string(),
            content,
        });

        id
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
    }

    pub fn get(&self, id: u64) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries of the current directory matching the search query (name only)
    pub fn listing(&self) -> Vec<&FileEntry> {
        let query = self.search.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.parent == self.cwd)
            .filter(|e| query.is_empty() || e.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Enter a folder; the listing follows
    pub fn enter(&mut self, id: u64) -> PanelResult<&str> {
        let entry = self.get(id).ok_or(PanelError::NotFound(id))?;
        if !entry.is_folder() {
            return Err(PanelError::NotAFolder(entry.name.clone()));
        }

        let path = entry.path();
        self.cwd = path;
        self.search.clear();
        Ok(&self.cwd)
    }

    /// Go to the parent directory; false when already at the root
    pub fn up(&mut self) -> bool {
        if self.cwd == ROOT {
            return false;
        }

        let trimmed = self.cwd.trim_end_matches('/');
        let parent_len = trimmed.rfind('/').map(|i| i + 1).unwrap_or(1);
        self.cwd.truncate(parent_len);
        self.search.clear();
        true
    }

    /// Content of a file, for loading into the editor
    pub fn open(&self, id: u64) -> PanelResult<String> {
        let entry = self.get(id).ok_or(PanelError::NotFound(id))?;
        if entry.is_folder() {
            return Err(PanelError::IsFolder(entry.name.clone()));
        }
        Ok(entry.content.clone().unwrap_or_default())
    }

    /// Overwrite a file's content in place
    pub fn save(&mut self, id: u64, content: &str) -> PanelResult<()> {
        let entry = self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(PanelError::NotFound(id))?;
        if entry.is_folder() {
            return Err(PanelError::IsFolder(entry.name.clone()));
        }

        entry.content = Some(content.to_string());
        entry.size = Some(content.len() as u64);
        entry.modified = JUST_NOW.to_string();
        Ok(())
    }

    /// Delete an entry; a folder takes everything beneath it along
    pub fn remove(&mut self, id: u64) -> PanelResult<FileEntry> {
        let index = self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(PanelError::NotFound(id))?;
        let removed = self.entries.remove(index);

        if removed.is_folder() {
            let prefix = removed.path();
            self.entries.retain(|e| !e.parent.starts_with(&prefix));
        }

        Ok(removed)
    }

    /// Add an empty file with a generated name to the current directory
    pub fn upload(&mut self) -> u64 {
        let stamp = Local::now().timestamp_millis();
        let mut name = format!("newfile_{}.txt", stamp);
        let mut n = 1;
        while self.name_taken(&name) {
            name = format!("newfile_{}_{}.txt", stamp, n);
            n += 1;
        }

        let cwd = self.cwd.clone();
        self.insert(&cwd, &name, FileKind::File, JUST_NOW, Some(String::new()))
    }

    /// Create an empty folder in the current directory
    pub fn create_folder(&mut self, name: &str) -> PanelResult<u64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PanelError::Empty("folder name"));
        }
        if name == "." || name == ".." || name.contains('/') {
            return Err(PanelError::InvalidName(name.to_string()));
        }
        if self.name_taken(name) {
            return Err(PanelError::Duplicate(name.to_string()));
        }

        let cwd = self.cwd.clone();
        Ok(self.insert(&cwd, name, FileKind::Folder, JUST_NOW, None))
    }

    fn name_taken(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.parent == self.cwd && e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(store: &FileStore, name: &str) -> u64 {
        store.entries.iter().find(|e| e.name == name).unwrap().id
    }

    #[test]
    fn test_seeded_root_listing() {
        let store = FileStore::new();
        let names: Vec<&str> = store.listing().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["server.properties", "plugins", "world", "whitelist.json", "logs", "config.yml"]);
    }

    #[test]
    fn test_save_then_open_round_trip() {
        let mut store = FileStore::new();
        let id = id_of(&store, "server.properties");

        let edited = "server-port=25570\nmax-players=40\n\ndifficulty=hard";
        store.save(id, edited).unwrap();

        assert_eq!(store.open(id).unwrap(), edited);
        let entry = store.get(id).unwrap();
        assert_eq!(entry.modified, JUST_NOW);
        assert_eq!(entry.size, Some(edited.len() as u64));
    }

    #[test]
    fn test_folders_scope_listing() {
        let mut store = FileStore::new();
        let plugins = id_of(&store, "plugins");

        assert_eq!(store.enter(plugins).unwrap(), "/plugins/");
        let names: Vec<&str> = store.listing().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["EssentialsX.jar"]);

        assert!(store.up());
        assert_eq!(store.cwd(), ROOT);
        assert!(!store.up());
    }

    #[test]
    fn test_nested_up() {
        let mut store = FileStore::new();
        let world = id_of(&store, "world");
        store.enter(world).unwrap();
        let region = store.create_folder("region").unwrap();
        store.enter(region).unwrap();
        assert_eq!(store.cwd(), "/world/region/");

        store.up();
        assert_eq!(store.cwd(), "/world/");
    }

    #[test]
    fn test_search_matches_name_substring() {
        let mut store = FileStore::new();
        store.set_search("JSON");
        let names: Vec<&str> = store.listing().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["whitelist.json"]);

        store.set_search("nothing-here");
        assert!(store.listing().is_empty());
    }

    #[test]
    fn test_open_folder_is_refused() {
        let store = FileStore::new();
        let logs = id_of(&store, "logs");
        assert_eq!(store.open(logs), Err(PanelError::IsFolder("logs".to_string())));
        assert_eq!(store.open(999), Err(PanelError::NotFound(999)));
    }

    #[test]
    fn test_remove_folder_takes_children() {
        let mut store = FileStore::new();
        let before = store.entries.len();
        let logs = id_of(&store, "logs");

        store.remove(logs).unwrap();
        assert_eq!(store.entries.len(), before - 2);
        assert!(store.entries.iter().all(|e| e.name != "latest.log"));
    }

    #[test]
    fn test_upload_adds_empty_file_in_cwd() {
        let mut store = FileStore::new();
        let plugins = id_of(&store, "plugins");
        store.enter(plugins).unwrap();

        let first = store.upload();
        let second = store.upload();
        assert_ne!(store.get(first).unwrap().name, store.get(second).unwrap().name);

        let entry = store.get(first).unwrap();
        assert!(entry.name.starts_with("newfile_"));
        assert_eq!(entry.parent, "/plugins/");
        assert_eq!(entry.size_label().as_deref(), Some("0 B"));
        assert_eq!(store.open(first).unwrap(), "");
    }

    #[test]
    fn test_create_folder_checks() {
        let mut store = FileStore::new();
        assert_eq!(store.create_folder("  "), Err(PanelError::Empty("folder name")));
        assert_eq!(store.create_folder("world"), Err(PanelError::Duplicate("world".to_string())));
        assert!(store.create_folder("backups").is_ok());
    }

    #[test]
    fn test_create_folder_rejects_path_like_names() {
        let mut store = FileStore::new();
        let before = store.entries.len();
        for name in ["a/b", "..", ".", "/"] {
            assert_eq!(store.create_folder(name), Err(PanelError::InvalidName(name.to_string())));
        }
        assert_eq!(store.entries.len(), before);

        // A nested folder still walks back up to the root
        let world = id_of(&store, "world");
        store.enter(world).unwrap();
        let region = store.create_folder("region").unwrap();
        store.enter(region).unwrap();
        store.up();
        store.up();
        assert_eq!(store.cwd(), ROOT);
        assert!(!store.listing().is_empty());
    }
}
