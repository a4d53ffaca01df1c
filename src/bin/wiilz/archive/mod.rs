// archive/mod.rs from wiilz (c) 2025 NinjaCheetah & Contributors
// https://github.com/NinjaCheetah/wiilz
//
// Root for the archive-related commands in the wiilz CLI.

pub mod lz77;
