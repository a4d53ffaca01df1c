// archive/mod.rs from wiilz (c) 2025 NinjaCheetah & Contributors
// https://github.com/NinjaCheetah/wiilz
//
// Root for all compression and archive format modules.

pub mod lz77;
