pub mod public_helpers;
