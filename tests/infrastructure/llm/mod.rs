mod client_factory_test;
mod scripted_generation_client_test;
