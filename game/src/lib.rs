pub mod button;
pub mod controller;
pub mod highlight;
pub mod rodio_output;
pub mod sequence;
pub mod session;
pub mod settings;
pub mod timing;
pub mod tone;
pub mod view;
