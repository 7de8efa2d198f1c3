mod multipart_decoder_tests;
mod prepared_request_tests;
