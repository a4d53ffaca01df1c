// lib.rs from wiilz (c) 2025 NinjaCheetah & Contributors
// https://github.com/NinjaCheetah/wiilz
//
// Root level module that imports the feature modules.

pub mod archive;
