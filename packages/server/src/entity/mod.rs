pub mod file_name_hash;
pub mod import_folder;
pub mod video_local;
pub mod video_local_place;
