pub mod counselor;
