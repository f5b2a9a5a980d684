mod common;
mod fake_hash;
