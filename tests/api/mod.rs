mod chat_room_tests;
mod health_tests;
mod user_tests;
