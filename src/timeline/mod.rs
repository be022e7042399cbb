pub mod choreograph;
pub mod model;
pub mod player;
pub mod scene;
pub mod stop;
