mod test_rest_client;
