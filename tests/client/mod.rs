mod chat_api_client_test;
