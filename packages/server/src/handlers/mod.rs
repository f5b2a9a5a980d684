pub mod fake_hash;
