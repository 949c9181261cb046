mod test_keepalive_pings;
mod test_lobby_capacity;
