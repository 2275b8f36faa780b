pub mod demo_profiles_seed;
