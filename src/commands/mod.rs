pub mod checked;
pub mod click;
pub mod fill;
pub mod locate;
pub mod see;
pub mod utils;
