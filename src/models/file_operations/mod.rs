pub mod posts_file_operations;
