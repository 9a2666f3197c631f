mod home;
pub use home::Home;

mod links;
pub use links::Links;
