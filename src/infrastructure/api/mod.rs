pub mod mekody;
