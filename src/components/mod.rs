mod home;
mod notice_list;
mod photo_card;

pub use home::HomeScreen;
pub use notice_list::NoticeList;
pub use photo_card::PhotoCard;
