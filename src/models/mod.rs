pub mod booking;
pub mod movie;
pub mod review;
pub mod screen;
pub mod seat;
pub mod showtime;
pub mod user;

pub use booking::{Booking, BookingStatus, BookingSummary, PaymentStatus};
pub use movie::Movie;
pub use review::{Review, ReviewWithAuthor};
pub use screen::Screen;
pub use seat::{SeatLabel, SeatMap};
pub use showtime::Showtime;
pub use user::{User, UserRole};
